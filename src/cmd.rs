use derive_more::{Display, From};
use log::{debug, error, warn};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::try_join;

#[derive(Debug, From, Display)]
pub enum CommandError {
    #[display(fmt = "IO Error occurred while executing command: {}", _0)]
    IO(io::Error),
    #[display(fmt = "Process exited with non-zero exit code: Code {}: {}", code, stderr)]
    #[from(ignore)]
    NonZeroExitCode { code: i32, stderr: String },
    #[display(fmt = "Process was terminated before it could exit")]
    #[from(ignore)]
    Terminated,
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Executes `program` with the provided `args` in the provided working
/// directory. Nothing passes through a shell so arguments are never
/// split or expanded. `envs` are added on top of the inherited
/// environment.
///
/// Returns the trimmed stdout of the process on a zero exit code
pub async fn run_command(
    working_dir: impl AsRef<Path>,
    program: &str,
    args: &[&str],
    envs: &[(String, String)],
) -> CommandResult<String> {
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    for (key, value) in envs {
        command.env(key, value);
    }

    debug!("Running {program} {}", args.join(" "));

    let mut child = command.spawn()?;
    let (stdout, stderr) = try_join!(
        read_lines(child.stdout.take(), false),
        read_lines(child.stderr.take(), true),
    )?;
    let exit_status = child.wait().await?;

    match exit_status.code() {
        Some(0) => Ok(stdout.join("\n").trim().to_string()),
        Some(code) => Err(CommandError::NonZeroExitCode {
            code,
            stderr: stderr.join("\n").trim().to_string(),
        }),
        None => Err(CommandError::Terminated),
    }
}

/// Reads every line from the optional child stream until it closes,
/// forwarding each line to the log as it arrives
async fn read_lines<R>(reader: Option<R>, stderr: bool) -> io::Result<Vec<String>>
where
    R: AsyncRead + Unpin,
{
    let mut out = Vec::new();
    let Some(reader) = reader else {
        return Ok(out);
    };
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        if stderr {
            pipe_line(&line);
        } else {
            debug!("{line}");
        }
        out.push(line);
    }
    Ok(out)
}

/// Splits a piped line output into the line itself and the
/// message prefix git uses for its level if one is present
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (level, text) = line.split_once(':')?;
    if level.contains(char::is_whitespace) {
        return None;
    }
    Some((level, text.trim_start()))
}

/// Pipes a stderr line to the proper log level
fn pipe_line(line: &str) {
    match split_line(line) {
        Some(("fatal" | "error", text)) => error!("{text}"),
        Some(("warning", text)) => warn!("{text}"),
        _ => debug!("{line}"),
    }
}
