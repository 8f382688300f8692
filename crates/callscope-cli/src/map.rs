//! The `map` command: analyse a tree and render its call graph.

use std::fs;
use std::io::Write;

use camino::Utf8Path;
use tracing::info;

use callscope_config::Config;
use callscope_graph::{AnalysisOptions, GraphPayload, analyze};

use crate::cli::MapArgs;
use crate::output::{ResolvedOutputFormat, render_summary};
use crate::{AppError, IoStreams};

pub(crate) fn execute<W, E>(
    args: &MapArgs,
    config: &Config,
    io: &mut IoStreams<'_, W, E>,
) -> Result<(), AppError>
where
    W: Write,
    E: Write,
{
    let mut options =
        AnalysisOptions::new().with_extra_skip_dirs(config.extra_skip_dirs().iter().cloned());
    if let Some(focus) = args.focus.as_deref() {
        options = options.with_focus(focus);
    }

    let graph = analyze(&args.path, &options)?;
    let payload = GraphPayload::from(&graph);

    if let Some(target) = args.json.as_deref() {
        write_payload(target, &payload)?;
        writeln!(io.stderr, "Graph data written to {target}").map_err(AppError::Emit)?;
    }

    match args.output.resolve(io.stdout_is_terminal()) {
        ResolvedOutputFormat::Human => io
            .stdout
            .write_all(render_summary(&payload.summary).as_bytes())
            .map_err(AppError::Emit)?,
        ResolvedOutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *io.stdout, &payload)
                .map_err(AppError::SerialisePayload)?;
            io.stdout.write_all(b"\n").map_err(AppError::Emit)?;
        }
    }
    io.stdout.flush().map_err(AppError::Emit)
}

fn write_payload(target: &Utf8Path, payload: &GraphPayload) -> Result<(), AppError> {
    let mut rendered = serde_json::to_string_pretty(payload).map_err(AppError::SerialisePayload)?;
    rendered.push('\n');
    fs::write(target, rendered).map_err(|source| AppError::WritePayload {
        path: target.to_path_buf(),
        source,
    })?;
    info!(
        target: "callscope::cli",
        path = %target,
        nodes = payload.nodes.len(),
        edges = payload.edges.len(),
        "wrote graph payload"
    );
    Ok(())
}
