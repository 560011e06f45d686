//! zipdll - 命令行调试工具
//!
//! Runs the plugin entry points outside the installer. Arguments are placed
//! on the stack in the order given, exactly as an installer script would.
//!
//! 命令格式:
//!   zipdll extractall [/TRANSLATE t1..t8] <source> <destination>
//!   zipdll extractfile [/TRANSLATE t1..t8] <source> <destination> <file>

use std::env;
use std::process::ExitCode;

use zipdll::{extract_all, extract_file, ConsoleLog, HostStack, VecStack, RESULT_SUCCESS};

// 退出码定义
const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("zipdll");
    if args.len() < 3 {
        usage(program);
        return ExitCode::from(EXIT_USAGE);
    }

    let mut stack = VecStack::with_args(&args[2..]);
    let mut console = ConsoleLog;
    match args[1].as_str() {
        "extractall" => extract_all(&mut stack, &mut console),
        "extractfile" => extract_file(&mut stack, &mut console),
        _ => {
            usage(program);
            return ExitCode::from(EXIT_USAGE);
        }
    }

    let result = stack.pop().unwrap_or_default();
    println!("{}", result);
    if result == RESULT_SUCCESS {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURE)
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {} extractall [/TRANSLATE t1..t8] <source> <destination>", program);
    eprintln!("       {} extractfile [/TRANSLATE t1..t8] <source> <destination> <file>", program);
}
