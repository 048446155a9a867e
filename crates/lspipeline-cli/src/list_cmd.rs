//! No-argument mode: usage banner followed by every pipeline name.

use std::io::{self, Write};

use lspipeline_core::PipelineApi;

/// Header printed between the usage banner and the pipeline names.
pub const PIPELINES_HEADER: &str = "====== PIPELINES ======";

pub fn write_usage(w: &mut impl Write, program: &str) -> io::Result<()> {
    write!(
        w,
        "USAGE:

\t// Show live pipeline status (Esc to quit)
\t{program} <pipeline-name>

\t// Print pipeline status once as a table
\t{program} --table <pipeline-name>

\t// List all pipeline names (no arguments)
\t{program}

"
    )
}

/// Print the usage banner, then one pipeline name per line.
///
/// The banner is written before the remote call, so it is visible even when
/// listing fails.
pub async fn run<A>(api: &A, program: &str, w: &mut impl Write) -> lspipeline_core::Result<()>
where
    A: PipelineApi + ?Sized,
{
    write_usage(w, program)?;
    writeln!(w, "{PIPELINES_HEADER}")?;
    w.flush()?;

    for name in api.list_pipeline_names().await? {
        writeln!(w, "{name}")?;
    }
    Ok(())
}
