//! Compact status line with shorter timeouts

use rt_statusline::Variant;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    rt_statusline::init_tracing();
    rt_statusline::run(Variant::Simple).await
}
