//! Command handlers for the openmemory CLI.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use openmemory::errors::Error;
use openmemory::output::{StatusResponse, ToolRequest, ToolResponse, print_json};
use openmemory::tools::describe_error;
use openmemory::{MemoryProvider, TextContent, ToolDispatcher};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Commands supported by the openmemory CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Serve tool calls over stdin/stdout, one JSON object per line
    Serve,
    /// Run a single tool call
    Call {
        /// Tool name (e.g. add_memories)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short = 'a', long)]
        args: Option<String>,
    },
    /// Show the tool catalogue
    Tools {
        /// Print the catalogue as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show backend and storage status
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
    Version,
}

/// Execute a CLI command.
pub fn execute<P: MemoryProvider>(
    command: &Commands,
    dispatcher: &mut ToolDispatcher<P>,
) -> Result<ExitCode, Error> {
    match command {
        Commands::Serve => handle_serve(dispatcher),
        Commands::Call { tool, args } => handle_call(dispatcher, tool, args.as_deref()),
        Commands::Tools { json } => handle_tools(dispatcher, *json),
        Commands::Status { json } => handle_status(dispatcher, *json),
        Commands::Version => handle_version(),
    }
}

fn handle_serve<P: MemoryProvider>(dispatcher: &mut ToolDispatcher<P>) -> Result<ExitCode, Error> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let handled = serve(dispatcher, stdin.lock(), stdout.lock())?;
    info!(requests = handled, "input closed, shutting down");
    Ok(ExitCode::SUCCESS)
}

/// Answer line-delimited tool requests until `input` is exhausted.
///
/// Each non-blank input line is a [`ToolRequest`]; each produces exactly one
/// [`ToolResponse`] line. Malformed lines get an error text block and the loop
/// carries on, including lines that are not UTF-8; only an I/O failure on
/// either stream ends it early. Returns the number of requests answered.
pub fn serve<P, R, W>(
    dispatcher: &mut ToolDispatcher<P>,
    mut input: R,
    mut output: W,
) -> Result<usize, Error>
where
    P: MemoryProvider,
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    let mut handled = 0;
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let content = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => match serde_json::from_str::<ToolRequest>(line) {
                Ok(request) => dispatcher.dispatch(&request.name, &request.arguments),
                Err(e) => malformed(e),
            },
            Err(e) => malformed(e),
        };

        let json =
            serde_json::to_string(&ToolResponse { content }).map_err(std::io::Error::other)?;
        writeln!(output, "{}", json)?;
        output.flush()?;
        handled += 1;
    }
    Ok(handled)
}

fn malformed(e: impl std::fmt::Display) -> Vec<TextContent> {
    warn!(error = %e, "malformed tool request");
    vec![TextContent::text(format!("Error: malformed request: {}", e))]
}

fn handle_call<P: MemoryProvider>(
    dispatcher: &mut ToolDispatcher<P>,
    tool: &str,
    args: Option<&str>,
) -> Result<ExitCode, Error> {
    let arguments = match parse_call_args(args) {
        Ok(arguments) => arguments,
        Err(message) => {
            eprintln!("Error: {}", message);
            return Ok(ExitCode::FAILURE);
        }
    };

    match dispatcher.call(tool, &arguments) {
        Ok(text) => {
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", describe_error(tool, &e));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn parse_call_args(args: Option<&str>) -> Result<Map<String, Value>, String> {
    let Some(raw) = args else {
        return Ok(Map::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("--args must be a JSON object".to_string()),
        Err(e) => Err(format!("--args is not valid JSON: {}", e)),
    }
}

fn handle_tools<P: MemoryProvider>(
    dispatcher: &ToolDispatcher<P>,
    json: bool,
) -> Result<ExitCode, Error> {
    let tools = dispatcher.tools();
    if json {
        print_json(&tools);
    } else {
        for tool in tools {
            println!("{}: {}", tool.name, tool.description);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_status<P: MemoryProvider>(
    dispatcher: &mut ToolDispatcher<P>,
    json: bool,
) -> Result<ExitCode, Error> {
    if json {
        print_json(&StatusResponse::running(dispatcher.provider().status()));
    } else {
        for block in dispatcher.dispatch("get_status", &Map::new()) {
            println!("{}", block.text);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_version() -> Result<ExitCode, Error> {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(ExitCode::SUCCESS)
}
