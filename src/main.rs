use std::{fs, num::NonZeroUsize, path::PathBuf};

use anyhow::{bail, Context};
use bf_tapegen::{
    arith::{binary_op_code, CodegenOptions},
    bf::{BF, DEFAULT_MAX_STEPS, DEFAULT_MEMORY_SIZE},
    console::print_string_code,
    encoder::set_cell_value_code,
    errors::Result,
    token::{BinaryOp, UnaryOp},
    unary::{unary_postfix_code, unary_prefix_code},
    Code,
};
use clap::Parser;
use log::{info, Level};

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
struct Command {
    #[command(subcommand)]
    subcommand: SubCommand,
    #[arg(long, default_value_t = Level::Warn)]
    log_level: Level,
}

#[derive(Debug, clap::Subcommand)]
enum SubCommand {
    /// Print the snippet for a binary or unary operator
    Op(OpArg),
    /// Print the snippet that sets a cell to a value
    Number(NumberArg),
    /// Print the snippet that prints a string
    String(StringArg),
    /// Run a Brainfuck program
    Run(RunArg),
}

#[derive(Debug, clap::Parser)]
struct OpArg {
    symbol: String,
    /// Leave out the division by zero guard of `/` and `%`
    #[clap(long)]
    no_zero_check: bool,
    /// How far left the variable is, for `++ -- ** // %%`
    #[clap(long, default_value_t = NonZeroUsize::MIN)]
    offset: NonZeroUsize,
    #[clap(long)]
    postfix: bool,
}

#[derive(Debug, clap::Parser)]
struct NumberArg {
    value: u8,
    /// Value the cell holds before
    #[clap(short, long, default_value_t = 0)]
    previous: u8,
    /// The next cell is known to be zero
    #[clap(long)]
    no_zero_next: bool,
}

#[derive(Debug, clap::Parser)]
struct StringArg {
    text: String,
}

#[derive(Debug, clap::Parser)]
struct RunArg {
    file: PathBuf,
    /// Program input; `\n` is read as a newline
    #[clap(short, long, default_value = "")]
    input: String,
    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: u64,
    #[clap(long, default_value_t = DEFAULT_MEMORY_SIZE)]
    memory: usize,
}

fn operator_code(arg: &OpArg) -> Result<Code> {
    if let Some(op) = BinaryOp::from_symbol(&arg.symbol) {
        let options = CodegenOptions {
            division_by_zero_check: !arg.no_zero_check,
        };
        return Ok(binary_op_code(op, &options)?);
    }

    let Some(op) = UnaryOp::from_symbol(&arg.symbol) else {
        bail!("unknown operator {:?}", arg.symbol);
    };
    let code = if arg.postfix {
        unary_postfix_code(op, arg.offset.get())?
    } else {
        unary_prefix_code(op, Some(arg.offset.get()))?
    };
    Ok(code)
}

fn main() -> Result<()> {
    let arg = Command::parse();

    env_logger::builder()
        .filter_level(arg.log_level.to_level_filter())
        .init();

    match arg.subcommand {
        SubCommand::Op(arg) => println!("{}", operator_code(&arg)?),
        SubCommand::Number(arg) => {
            println!("{}", set_cell_value_code(arg.value, arg.previous, !arg.no_zero_next))
        }
        SubCommand::String(arg) => println!("{}", print_string_code(&arg.text)),
        SubCommand::Run(arg) => {
            let code = fs::read_to_string(&arg.file)
                .with_context(|| format!("failed to read {}", arg.file.display()))?;
            let input = arg.input.replace("\\n", "\n");

            let mut bf = BF::new(&code)
                .with_memory_size(arg.memory)
                .with_max_steps(arg.max_steps)
                .with_input(input.as_bytes())
                .with_echo(true);
            let result = bf.run();
            info!("{} steps", bf.steps());
            result?;
        }
    }
    Ok(())
}
