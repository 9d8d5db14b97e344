//! Status line for the host tool: project, size estimate, tokens and git state

use rt_statusline::Variant;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    rt_statusline::init_tracing();
    rt_statusline::run(Variant::Full).await
}
