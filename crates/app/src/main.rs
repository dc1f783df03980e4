use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tcline_app=debug")),
        )
        .init();

    let config = tcline_app::config::AppConfig::from_env();
    tracing::info!(backend = %config.backend_url, "starting timeline");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 720.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("Timecode Timeline")
            .with_drag_and_drop(true),
        vsync: true,
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Timecode Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(tcline_app::TimelineApp::new(cc, config)?))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run timeline window: {e}"))
}
