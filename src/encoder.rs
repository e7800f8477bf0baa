use crate::code::Code;

/// Code that turns the current cell from `previous_value` into `new_value`.
///
/// Two candidates are built and the shorter one returned (the plain one on a tie):
///
/// * plain: `+` or `-`, once per unit of difference
/// * looped: a counter in the next cell runs `a` times, adding `b` per round,
///   followed by `c` single steps, with `a * b + c` equal to the difference
///
/// The looped form uses the next cell. With `zero_next_cell_if_necessary` unset the
/// caller promises that cell already holds zero; it is zero again afterwards either
/// way. The pointer ends on the original cell.
pub fn set_cell_value_code(new_value: u8, previous_value: u8, zero_next_cell_if_necessary: bool) -> Code {
    let offset = i32::from(new_value) - i32::from(previous_value);
    let increase = offset > 0;
    let distance = offset.unsigned_abs() as usize;

    let mut plain = Code::new();
    steps(&mut plain, increase, distance);

    let (a, b, c) = loop_factors(distance);
    let mut looped = Code::new();
    looped.right(1);
    if zero_next_cell_if_necessary {
        looped.clear();
    }
    looped.add(a).raw("[-<");
    steps(&mut looped, increase, b);
    looped.raw(">]<");
    steps(&mut looped, increase, c);

    if plain.len() <= looped.len() {
        plain
    } else {
        looped
    }
}

fn steps(code: &mut Code, increase: bool, times: usize) {
    if increase {
        code.add(times);
    } else {
        code.sub(times);
    }
}

/// `(a, b, c)` with `a * b + c == distance` and `a + b + c` as small as possible.
fn loop_factors(distance: usize) -> (usize, usize, usize) {
    let mut best = (distance, 1, 0);
    for a in 1..=distance / 2 {
        let candidate = (a, distance / a, distance % a);
        if candidate.0 + candidate.1 + candidate.2 < best.0 + best.1 + best.2 {
            best = candidate;
        }
    }
    best
}
