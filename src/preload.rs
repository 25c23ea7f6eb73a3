//! Image preloading — never fails, only settles.
//!
//! A slot that cannot be loaded renders empty rather than aborting the whole
//! transition, so `preload` maps every failure to `None` and never returns
//! an error. Platform decoding goes through the `ImageBackend` capability
//! trait; the three slot loads run concurrently on scoped worker threads and
//! the caller proceeds once all three have settled (join-all).

use std::thread;

use log::debug;

/// Platform image loading backend.
///
/// `open` starts fetching `src` and hands back a request whose progress is
/// observed through [`ImageRequest`]. The backend is shared across the three
/// concurrent slot loads.
pub trait ImageBackend: Sync {
    fn open(&self, src: &str) -> Box<dyn ImageRequest>;
}

/// One in-flight image load, mirroring the platform image element API.
pub trait ImageRequest: Send {
    /// The platform already reports the resource as fully loaded.
    fn is_complete(&self) -> bool;

    /// Natural pixel width. Zero on a complete image means it is broken.
    fn natural_width(&self) -> u32;

    /// Block until the asynchronous decode settles.
    ///
    /// Some rendering engines reject the decode even for a structurally
    /// valid image, so an error here is a hint, not a verdict — the caller
    /// falls back to the native load/error signal.
    fn decode(&mut self) -> anyhow::Result<()>;

    /// Block until the native load or error signal fires. True on load.
    fn await_load(&mut self) -> bool;
}

/// A decoded, renderable image handle, owned by the overlay slot that
/// displays it and dropped when the overlay is removed.
pub type PreloadedImage = Box<dyn ImageRequest>;

/// Load one image. `None` source settles immediately as `None` with no
/// request issued; a genuine load error also settles as `None`.
pub fn preload(backend: &dyn ImageBackend, src: Option<&str>) -> Option<PreloadedImage> {
    let src = src?;
    let mut request = backend.open(src);

    // Already loaded synchronously (e.g. cache hit). Zero natural width
    // means the platform kept a broken image around.
    if request.is_complete() {
        return (request.natural_width() > 0).then_some(request);
    }

    match request.decode() {
        Ok(()) => Some(request),
        Err(e) => {
            // Known false negative on some engines (observed on Safari):
            // decode rejects but the image is fine. Re-check completion,
            // then fall back to the load/error signal.
            debug!("preload: decode of {src} failed ({e}), falling back to load signal");
            if request.is_complete() {
                return (request.natural_width() > 0).then_some(request);
            }
            if request.await_load() {
                Some(request)
            } else {
                debug!("preload: {src} failed to load");
                None
            }
        }
    }
}

/// Load the three slot sources concurrently and join all of them.
///
/// A panicking backend settles its slot as `None`; the other slots are
/// unaffected.
pub fn preload_all(
    backend: &dyn ImageBackend,
    sources: &[Option<String>; 3],
) -> [Option<PreloadedImage>; 3] {
    thread::scope(|s| {
        let handles = sources
            .each_ref()
            .map(|src| s.spawn(move || preload(backend, src.as_deref())));
        handles.map(|h| h.join().unwrap_or(None))
    })
}
