use super::source::ThemeSource;
use crate::common::ThemeError;
use crate::palette::{Mode, Palette, PaletteCache};
use crate::shuffle::shuffle_thread;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Number of pre-generated theme files per mode on the theme service.
pub const DEFAULT_THEME_FILE_COUNT: u8 = 10;

/// Upper bound imposed by the two-digit file naming.
const MAX_THEME_FILE_COUNT: u8 = 99;

/// Cache-first palette retrieval.
///
/// Serves palettes from the shared [`PaletteCache`] and refills it from the
/// [`ThemeSource`] when a mode runs dry. Each refill reads the next theme file
/// in a small rotating set so repeated generations spread over all files.
///
/// Overlapping calls for the same mode are not serialized: both may miss the
/// cache and both may fill it. That only costs a redundant request.
pub struct ThemeFetcher {
    source: Arc<dyn ThemeSource>,
    cache: Arc<PaletteCache>,
    file_count: u8,
    next_index: AtomicU8,
    light_loading: AtomicBool,
    dark_loading: AtomicBool,
}

/// Clears a loading flag when the request settles or the future is dropped.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ThemeFetcher {
    pub fn new(source: Arc<dyn ThemeSource>, cache: Arc<PaletteCache>) -> Self {
        Self {
            source,
            cache,
            file_count: DEFAULT_THEME_FILE_COUNT,
            next_index: AtomicU8::new(1),
            light_loading: AtomicBool::new(false),
            dark_loading: AtomicBool::new(false),
        }
    }

    /// Set how many theme files the rotation cycles through (clamped to 1..=99).
    pub fn with_file_count(mut self, file_count: u8) -> Self {
        self.file_count = file_count.clamp(1, MAX_THEME_FILE_COUNT);
        if self.next_index.load(Ordering::SeqCst) > self.file_count {
            self.next_index.store(1, Ordering::SeqCst);
        }
        self
    }

    pub fn cache(&self) -> &Arc<PaletteCache> {
        &self.cache
    }

    pub fn file_count(&self) -> u8 {
        self.file_count
    }

    /// Index of the theme file the next refill will request.
    pub fn current_index(&self) -> u8 {
        self.next_index.load(Ordering::SeqCst)
    }

    /// Whether a refill request for `mode` is currently in flight.
    pub fn is_loading(&self, mode: Mode) -> bool {
        self.loading_flag(mode).load(Ordering::SeqCst)
    }

    fn loading_flag(&self, mode: Mode) -> &AtomicBool {
        match mode {
            Mode::Light => &self.light_loading,
            Mode::Dark => &self.dark_loading,
        }
    }

    /// Claim the current file index and move the rotation on by one.
    ///
    /// Cycles through `1..=file_count`; 0 is never produced.
    fn advance_index(&self) -> u8 {
        let file_count = self.file_count;
        // fetch_update only fails when the closure returns None
        match self
            .next_index
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |index| {
                Some(index % file_count + 1)
            }) {
            Ok(previous) | Err(previous) => previous,
        }
    }

    /// Return a palette for `mode`, refilling the cache from the source when
    /// it is empty.
    ///
    /// `Ok(None)` means the source answered with a batch holding no usable
    /// palettes; callers treat that as a no-op.
    ///
    /// # Errors
    ///
    /// Propagates the [`ThemeError`] of a failed refill. The cache is left
    /// unchanged and the rotation still advances, so the next attempt reads
    /// a different file.
    pub async fn fetch_mode(&self, mode: Mode) -> Result<Option<Palette>, ThemeError> {
        if let Some(palette) = self.cache.take(mode) {
            log::debug!("Serving {mode} palette from cache");
            return Ok(Some(palette));
        }

        let index = self.advance_index();
        log::info!("Palette cache for {mode} is empty, fetching theme file {index:02}");

        let result = {
            let _loading = LoadingGuard::set(self.loading_flag(mode));
            self.source.fetch_batch(mode, index).await
        };

        let batch = match result {
            Ok(batch) => batch,
            Err(e) => {
                log::error!("Failed to fetch {mode} themes: {e}");
                return Err(e);
            }
        };

        let mut entries = batch.results;
        shuffle_thread(&mut entries);
        let palettes: Vec<Palette> = entries
            .into_iter()
            .map(|entry| entry.palette)
            .filter(|palette| !palette.is_empty())
            .collect();

        log::info!("Fetched {} {mode} palettes", palettes.len());
        self.cache.fill(mode, palettes);

        Ok(self.cache.take(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::source::{ThemeBatch, ThemeEntry};
    use async_trait::async_trait;
    use claims::{assert_err, assert_none, assert_ok, assert_some};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Records requests and replays a scripted response.
    struct ScriptedSource {
        requests: Mutex<Vec<(Mode, u8)>>,
        response: Result<ThemeBatch, ThemeError>,
    }

    impl ScriptedSource {
        fn ok(palettes: &[&[&str]]) -> Self {
            let results = palettes
                .iter()
                .map(|colors| ThemeEntry {
                    palette: colors.iter().map(|c| (*c).into()).collect(),
                })
                .collect();
            Self {
                requests: Mutex::new(Vec::new()),
                response: Ok(ThemeBatch { results }),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                response: Err(ThemeError::Status {
                    url: "http://test/themes".to_string(),
                    status,
                }),
            }
        }

        fn requests(&self) -> Vec<(Mode, u8)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ThemeSource for ScriptedSource {
        async fn fetch_batch(&self, mode: Mode, index: u8) -> Result<ThemeBatch, ThemeError> {
            self.requests.lock().unwrap().push((mode, index));
            self.response.clone()
        }
    }

    fn fetcher_with(source: Arc<ScriptedSource>) -> ThemeFetcher {
        ThemeFetcher::new(source, Arc::new(PaletteCache::new()))
    }

    #[tokio::test]
    async fn test_cache_hit_skips_request() {
        let source = Arc::new(ScriptedSource::ok(&[&["#000", "#fff"]]));
        let fetcher = fetcher_with(source.clone());
        fetcher
            .cache()
            .fill(Mode::Dark, vec![vec!["#123".into(), "#456".into()]]);

        let palette = assert_some!(assert_ok!(fetcher.fetch_mode(Mode::Dark).await));
        assert_eq!(palette[0].as_str(), "#123");
        assert!(source.requests().is_empty());
        assert_eq!(fetcher.current_index(), 1);
    }

    #[tokio::test]
    async fn test_miss_fills_cache_and_returns_one() {
        let source = Arc::new(ScriptedSource::ok(&[
            &["#000", "#fff"],
            &["#111", "#eee"],
            &["#222", "#ddd"],
        ]));
        let fetcher = fetcher_with(source.clone());

        assert_some!(assert_ok!(fetcher.fetch_mode(Mode::Light).await));
        assert_eq!(source.requests(), vec![(Mode::Light, 1)]);
        assert_eq!(fetcher.cache().len(Mode::Light), 2);

        // The remaining two are served without further requests
        assert_some!(assert_ok!(fetcher.fetch_mode(Mode::Light).await));
        assert_some!(assert_ok!(fetcher.fetch_mode(Mode::Light).await));
        assert_eq!(source.requests().len(), 1);

        // Drained: the next call refills from the next file
        assert_some!(assert_ok!(fetcher.fetch_mode(Mode::Light).await));
        assert_eq!(source.requests(), vec![(Mode::Light, 1), (Mode::Light, 2)]);
    }

    #[tokio::test]
    async fn test_failure_leaves_cache_and_clears_loading() {
        let source = Arc::new(ScriptedSource::failing(500));
        let fetcher = fetcher_with(source.clone());

        let error = assert_err!(fetcher.fetch_mode(Mode::Dark).await);
        assert_eq!(error.status(), Some(500));
        assert!(error.to_string().contains("500"));
        assert!(!fetcher.is_loading(Mode::Dark));
        assert!(fetcher.cache().is_empty(Mode::Dark));
        // Failed attempts still move the rotation on
        assert_eq!(fetcher.current_index(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_yields_none() {
        let empty: &[&str] = &[];
        let source = Arc::new(ScriptedSource::ok(&[empty]));
        let fetcher = fetcher_with(source);

        assert_none!(assert_ok!(fetcher.fetch_mode(Mode::Light).await));
        assert!(fetcher.cache().is_empty(Mode::Light));
    }

    #[tokio::test]
    async fn test_rotation_wraps_to_one() {
        let source = Arc::new(ScriptedSource::failing(404));
        let fetcher = fetcher_with(source.clone()).with_file_count(3);

        for _ in 0..7 {
            let _ = fetcher.fetch_mode(Mode::Light).await;
        }

        let indices: Vec<u8> = source.requests().into_iter().map(|(_, i)| i).collect();
        assert_eq!(indices, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    /// Holds every request open until released.
    #[derive(Default)]
    struct GatedSource {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ThemeSource for GatedSource {
        async fn fetch_batch(&self, _mode: Mode, _index: u8) -> Result<ThemeBatch, ThemeError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(ThemeBatch {
                results: vec![ThemeEntry {
                    palette: vec!["#000".into(), "#fff".into()],
                }],
            })
        }
    }

    #[tokio::test]
    async fn test_loading_flag_tracks_request_in_flight() {
        let source = Arc::new(GatedSource::default());
        let fetcher = Arc::new(ThemeFetcher::new(
            source.clone(),
            Arc::new(PaletteCache::new()),
        ));
        assert!(!fetcher.is_loading(Mode::Light));

        let task = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.fetch_mode(Mode::Light).await }
        });

        source.started.notified().await;
        assert!(fetcher.is_loading(Mode::Light));
        assert!(!fetcher.is_loading(Mode::Dark));

        source.release.notify_one();
        let palette = assert_some!(assert_ok!(task.await.unwrap()));
        assert_eq!(palette[0].as_str(), "#000");
        assert!(!fetcher.is_loading(Mode::Light));
    }

    #[test]
    fn test_file_count_is_clamped() {
        let source = Arc::new(ScriptedSource::ok(&[]));
        assert_eq!(fetcher_with(source.clone()).with_file_count(0).file_count(), 1);
        assert_eq!(fetcher_with(source).with_file_count(200).file_count(), 99);
    }
}
