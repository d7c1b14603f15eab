use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    time::{Duration, Instant},
};

use clap::Parser;
use sqy::{
    errors::errors::Error,
    format_error,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Expression tokenizer and Pratt parser.
#[derive(Parser, Debug)]
#[command(name = "sqy", about = "Tokenize and parse sqy expressions")]
struct Args {
    /// Expression to parse once
    expression: Option<String>,

    /// Start the interactive console (`exit` quits, `clear` clears the screen)
    #[arg(long)]
    console: bool,

    /// Tokenize a whole file
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Tokenize the built-in sample programs
    #[arg(long)]
    example: bool,

    /// Time the tokenizer over a growing `1+1+...` program
    #[arg(long)]
    bench: bool,

    /// Tokenizer runs per program size
    #[arg(long, default_value_t = 1000)]
    repeat: usize,

    /// Number of program sizes, each ten times the previous
    #[arg(long, default_value_t = 1)]
    factor: u32,

    /// Print the parse tree instead of the tokens in console and input modes
    #[arg(long)]
    ast: bool,
}

const SAMPLES: [&str; 2] = ["suma (a,b |c) :: c:a+b", "lista <- [1,2,3,4,5,6]"];
const BENCH_SEED: &str = "1+1+1+1+1+1+1+1+1+1+";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sqy=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    debug!(?args, "starting");

    if args.console {
        return console(args.ast);
    }

    if let Some(path) = &args.input {
        let Ok(program) = read_to_string(path) else {
            eprintln!("Failed to read {}", path.display());
            return ExitCode::FAILURE;
        };
        let file = path.to_string_lossy().to_string();
        println!("{}", program);
        return report(run(&program, &file, args.ast), &program);
    }

    if args.example {
        let mut failed = false;
        for sample in SAMPLES {
            println!(">> {}", sample);
            let result = run(sample, "example", false);
            failed |= result.is_err();
            report(result, sample);
        }
        return if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS };
    }

    if args.bench {
        bench(args.repeat, args.factor);
        return ExitCode::SUCCESS;
    }

    match &args.expression {
        Some(expression) => match parse(expression.clone(), None) {
            Ok(tree) => {
                println!("{} -> Expression {}", expression, tree);
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprint!("{}", format_error(&error, expression));
                ExitCode::FAILURE
            }
        },
        None => console(args.ast),
    }
}

/// Tokenizes or parses one request and renders the result.
fn run(source: &str, file: &str, ast: bool) -> Result<String, Error> {
    if ast {
        let tree = parse(source.to_string(), Some(file.to_string()))?;
        Ok(tree.to_string())
    } else {
        let tokens = tokenize(source.to_string(), Some(file.to_string()))?;
        Ok(render_tokens(&tokens))
    }
}

fn report(result: Result<String, Error>, source: &str) -> ExitCode {
    match result {
        Ok(output) => {
            println!("{}\n", output);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", format_error(&error, source));
            ExitCode::FAILURE
        }
    }
}

fn render_tokens(tokens: &[Token]) -> String {
    let rendered: Vec<String> = tokens.iter().map(|token| token.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

/// Reads one line at a time; a failed request is reported and the loop goes on.
fn console(ast: bool) -> ExitCode {
    println!("Squanchy PL {} Test", if ast { "Parser" } else { "Lexer" });
    println!("v{}\n", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!(">> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(error)) => {
                eprintln!("Failed to read input: {}", error);
                return ExitCode::FAILURE;
            }
            None => return ExitCode::SUCCESS,
        };

        match line.trim() {
            "exit" => return ExitCode::SUCCESS,
            "clear" => {
                print!("\x1B[2J\x1B[1;1H");
                continue;
            }
            _ => {}
        }

        report(run(&line, "shell", ast), &line);
    }
}

fn bench(repeat: usize, factor: u32) {
    let mut program = String::from(BENCH_SEED);

    for _ in 0..factor {
        let mut total = Duration::ZERO;
        for _ in 0..repeat {
            let start = Instant::now();
            let tokens = tokenize(program.clone(), None);
            total += start.elapsed();

            if let Err(error) = tokens {
                eprint!("{}", format_error(&error, &program));
                return;
            }
        }

        let mean = total / repeat.max(1) as u32;
        info!(len = program.len(), ?mean, "benchmarked tokenizer");
        println!("sqy time >> {} bytes: {:?}", program.len(), mean);

        program = program.repeat(10);
    }
}
