//! Background planet generation
//!
//! Runs the pipeline on a dedicated thread so a UI thread stays responsive.
//! Finished planets are published whole as `Arc<Planet>`; a reader sees
//! either the previous planet or the complete new one, never a partial one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use crate::config::PlanetConfig;
use crate::error::{PlanetError, Result};
use crate::planet::Planet;

/// Capacity of the result channel
const RESULT_CAPACITY: usize = 4;

/// A queued generation request
struct Request {
    ticket: u64,
    config: PlanetConfig,
}

/// A finished generation, successful or not
struct Finished {
    ticket: u64,
    result: Result<Planet>,
}

/// Generates planets on a background thread
///
/// Each [`submit`](Self::submit) supersedes every earlier request: requests
/// still queued are skipped, and results of superseded requests are dropped.
pub struct PlanetWorker {
    request_sender: Sender<Request>,
    result_receiver: Receiver<Finished>,
    /// Ticket of the most recent submission
    latest_ticket: Arc<AtomicU64>,
    /// Most recently published planet
    current: Option<Arc<Planet>>,
    /// Ticket of `current`
    published_ticket: u64,
    /// Ticket of the last accepted result, successful or not
    finished_ticket: u64,
    /// Error of the last accepted result, if it failed
    last_error: Option<PlanetError>,
}

impl PlanetWorker {
    /// Start the worker thread
    ///
    /// # Errors
    ///
    /// Returns `WorkerUnavailable` if the thread cannot be spawned.
    pub fn spawn() -> Result<Self> {
        let (request_sender, request_receiver) = unbounded::<Request>();
        let (result_sender, result_receiver) = bounded::<Finished>(RESULT_CAPACITY);
        let latest_ticket = Arc::new(AtomicU64::new(0));

        let latest = Arc::clone(&latest_ticket);
        std::thread::Builder::new()
            .name("planet-gen-worker".into())
            .spawn(move || {
                while let Ok(request) = request_receiver.recv() {
                    if request.ticket < latest.load(Ordering::Acquire) {
                        log::debug!("skipping superseded request {}", request.ticket);
                        continue;
                    }

                    let result = Planet::generate(request.config);

                    if request.ticket < latest.load(Ordering::Acquire) {
                        log::debug!("discarding superseded planet {}", request.ticket);
                        continue;
                    }
                    let finished = Finished {
                        ticket: request.ticket,
                        result,
                    };
                    if result_sender.send(finished).is_err() {
                        break;
                    }
                }
                log::debug!("planet worker exiting");
            })
            .map_err(|e| PlanetError::WorkerUnavailable(e.to_string()))?;

        Ok(Self {
            request_sender,
            result_receiver,
            latest_ticket,
            current: None,
            published_ticket: 0,
            finished_ticket: 0,
            last_error: None,
        })
    }

    /// Queue a generation, superseding any earlier request
    ///
    /// Returns the ticket identifying this request.
    pub fn submit(&self, config: PlanetConfig) -> Result<u64> {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::AcqRel) + 1;
        self.request_sender
            .send(Request { ticket, config })
            .map_err(|_| PlanetError::WorkerUnavailable("worker thread has exited".into()))?;
        Ok(ticket)
    }

    /// Publish a finished result if the latest request is done
    ///
    /// Non-blocking. Returns `None` while the latest request is still
    /// running. Stale results are drained and dropped.
    pub fn poll(&mut self) -> Option<Result<Arc<Planet>>> {
        let mut outcome = None;
        while let Ok(finished) = self.result_receiver.try_recv() {
            if let Some(result) = self.accept(finished) {
                outcome = Some(result);
            }
        }
        outcome
    }

    /// Block until the latest request is done and publish its result
    ///
    /// Returns at once if the latest result was already taken by
    /// [`poll`](Self::poll).
    ///
    /// # Errors
    ///
    /// Returns `WorkerUnavailable` if nothing was submitted or the thread
    /// has exited. If the latest request failed, its error is returned
    /// again even after `poll` reported it.
    pub fn wait(&mut self) -> Result<Arc<Planet>> {
        let latest = self.latest_ticket();
        if latest == 0 {
            return Err(PlanetError::WorkerUnavailable(
                "no generation request submitted".into(),
            ));
        }
        if self.finished_ticket == latest {
            return match (&self.current, &self.last_error) {
                (Some(planet), _) if self.published_ticket == latest => Ok(Arc::clone(planet)),
                (_, Some(error)) => Err(error.clone()),
                _ => Err(PlanetError::GenerationFailed(format!(
                    "request {} produced no planet",
                    latest
                ))),
            };
        }
        loop {
            let finished = self
                .result_receiver
                .recv()
                .map_err(|_| PlanetError::WorkerUnavailable("worker thread has exited".into()))?;
            if let Some(result) = self.accept(finished) {
                return result;
            }
        }
    }

    /// Most recently published planet
    pub fn current(&self) -> Option<Arc<Planet>> {
        self.current.clone()
    }

    /// Ticket of the most recent submission (0 before any)
    pub fn latest_ticket(&self) -> u64 {
        self.latest_ticket.load(Ordering::Acquire)
    }

    fn accept(&mut self, finished: Finished) -> Option<Result<Arc<Planet>>> {
        if finished.ticket != self.latest_ticket() {
            return None;
        }
        self.finished_ticket = finished.ticket;
        match finished.result {
            Ok(planet) => {
                let planet = Arc::new(planet);
                self.current = Some(Arc::clone(&planet));
                self.published_ticket = finished.ticket;
                self.last_error = None;
                Some(Ok(planet))
            }
            Err(error) => {
                self.last_error = Some(error.clone());
                Some(Err(error))
            }
        }
    }
}
