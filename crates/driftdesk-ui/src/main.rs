//! Driftdesk Desktop Application
//!
//! GPUI-based desktop client for chatting with local assistants.

use driftdesk_core::{
    AppSettings, AssistantTool, MessageRole, ModelInfo, Storage, ThreadAssistant, ThreadStore,
};
use driftdesk_ui::Theme;
use gpui::*;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod window;

use window::DriftdeskWindow;

/// Asset source that loads from the filesystem relative to the executable or current directory
struct FileAssetSource {
    base_path: PathBuf,
}

impl FileAssetSource {
    fn new() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

        let candidates = [
            exe_dir.join("assets"),
            PathBuf::from("assets"),
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets"),
        ];

        let base_path = candidates
            .into_iter()
            .find(|p| p.exists())
            .unwrap_or_else(|| PathBuf::from("assets"));

        info!("Asset base path: {:?}", base_path);
        Self { base_path }
    }
}

impl AssetSource for FileAssetSource {
    fn load(&self, path: &str) -> anyhow::Result<Option<Cow<'static, [u8]>>> {
        let full_path = self.base_path.join(path);
        match std::fs::read(&full_path) {
            Ok(bytes) => Ok(Some(Cow::Owned(bytes))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Asset not found: {:?}", full_path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, path: &str) -> anyhow::Result<Vec<SharedString>> {
        let full_path = self.base_path.join(path);
        let mut entries = Vec::new();
        if let Ok(dir) = std::fs::read_dir(&full_path) {
            for entry in dir.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    entries.push(name.to_string().into());
                }
            }
        }
        Ok(entries)
    }
}

/// Open the on-disk database, falling back to memory so the UI still starts
fn open_storage() -> anyhow::Result<Storage> {
    match Storage::open_default() {
        Ok(storage) => Ok(storage),
        Err(e) => {
            error!("Failed to open database, using in-memory storage: {}", e);
            Ok(Storage::in_memory()?)
        }
    }
}

/// First launch gets a thread to drop files onto
fn seed_welcome_thread(store: &ThreadStore) -> driftdesk_core::Result<()> {
    if !store.list_threads()?.is_empty() {
        return Ok(());
    }

    let assistant = ThreadAssistant::new("driftdesk", "Driftdesk", ModelInfo::new("default"))
        .with_tools(vec![AssistantTool::retrieval(true)]);
    let thread = store.create_thread("Welcome", vec![assistant])?;

    store.append_message(&thread.id, MessageRole::System, "You are a helpful assistant.")?;
    store.append_message(
        &thread.id,
        MessageRole::Assistant,
        "Drop a PDF onto this panel to attach it to your next message.",
    )?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Driftdesk v{}", env!("CARGO_PKG_VERSION"));

    let storage = Arc::new(open_storage()?);
    let settings = storage.load_settings().unwrap_or_else(|e| {
        warn!("Failed to load settings, using defaults: {}", e);
        AppSettings::default()
    });

    if let Err(e) = seed_welcome_thread(&ThreadStore::new(storage.clone())) {
        warn!("Failed to seed welcome thread: {}", e);
    }

    // Start GPUI application with asset loading
    App::new()
        .with_assets(FileAssetSource::new())
        .run(move |cx: &mut AppContext| {
            let theme = Theme::named(&settings.theme);
            info!("Theme initialized: {}", settings.theme);

            let window_options = WindowOptions {
                titlebar: Some(TitlebarOptions {
                    title: Some("Driftdesk".into()),
                    appears_transparent: true,
                    traffic_light_position: Some(point(px(9.0), px(9.0))),
                }),
                window_bounds: Some(WindowBounds::Windowed(Bounds {
                    origin: point(px(100.0), px(100.0)),
                    size: size(px(1100.0), px(760.0)),
                })),
                focus: true,
                show: true,
                kind: WindowKind::Normal,
                is_movable: true,
                window_background: WindowBackgroundAppearance::Opaque,
                app_id: Some("com.driftdesk.app".to_string()),
                ..Default::default()
            };

            let opened = cx.open_window(window_options, |cx| {
                cx.new_view(|cx| DriftdeskWindow::new(cx, theme, storage, settings))
            });
            if let Err(e) = opened {
                error!("Failed to open main window: {}", e);
                cx.quit();
            }
        });

    Ok(())
}
