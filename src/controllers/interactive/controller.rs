use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::errors::render_error::RenderError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::InteractiveControllerPresenterPort;
use crate::core::explorer::FractalExplorer;
use log::{debug, error};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, RenderRequest)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

/// Renders on a background worker, always working towards the newest request.
///
/// Submitting a request bumps the generation; an in-flight render for an
/// older generation is cancelled at its next row boundary and never reaches
/// the presenter or the explorer's cache.
pub struct InteractiveController {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(explorer: FractalExplorer, presenter_port: Arc<dyn InteractiveControllerPresenterPort>) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared, explorer);
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    pub fn submit_request(&self, request: RenderRequest) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = Some((generation, request));
        }

        self.shared.wake.notify_one();

        generation
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared.last_completed_generation.load(Ordering::Acquire)
    }

    fn next_request(shared: &SharedState) -> Option<(u64, RenderRequest)> {
        let mut guard = shared
            .latest_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        loop {
            if shared.shutdown.load(Ordering::Acquire) {
                return None;
            }

            if let Some(request) = guard.take() {
                return Some(request);
            }

            guard = shared.wake.wait(guard).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn worker_loop(shared: &Arc<SharedState>, mut explorer: FractalExplorer) {
        while let Some((job_generation, request)) = Self::next_request(shared) {
            let cancel_token = || {
                shared.shutdown.load(Ordering::Relaxed)
                    || job_generation != shared.generation.load(Ordering::Relaxed)
            };

            let start = Instant::now();
            let result = explorer.render_cancelable(&request.viewport, request.pixel_rect, &cancel_token);
            let render_duration = start.elapsed();

            let event = match result {
                Ok(frame) => RenderEvent::Frame(FrameData {
                    generation: job_generation,
                    frame,
                    render_duration,
                }),
                Err(err) if err.is_cancelled() => {
                    debug!("render {job_generation} superseded");
                    continue;
                }
                Err(err) => {
                    error!("render {job_generation} failed: {err}");
                    RenderEvent::Error(RenderError {
                        generation: job_generation,
                        message: err.to_string(),
                    })
                }
            };

            if job_generation != shared.generation.load(Ordering::Acquire) {
                continue;
            }

            shared.presenter_port.present(event);
            shared
                .last_completed_generation
                .store(job_generation, Ordering::Release);
        }
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
