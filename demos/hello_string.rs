use bf_tapegen::console::print_string_code;
use bf_tapegen::errors::Result;
use bf_tapegen::BF;

fn main() -> Result<()> {
    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hello, World!\n".to_string());

    let code = print_string_code(&text);
    println!("=== Code: {} instructions ===", code.len());
    println!("{}", code);

    println!("\n=== Output ===");
    let mut bf = BF::new(code.as_str()).with_echo(true);
    bf.run()?;
    println!("\n({} steps)", bf.steps());
    Ok(())
}
