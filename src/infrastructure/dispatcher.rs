//! Runs fetch requests off the UI thread.
//!
//! Each request gets its own worker thread; completions come back through a
//! channel that the event loop drains between key presses, so the session is
//! only ever mutated from one thread.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

use crate::domain::{FetchCompletion, FetchRequest, LocationLookup, LookupFailure};

type Job = Box<dyn FnOnce() + Send + 'static>;

pub struct FetchDispatcher {
    lookup: Arc<dyn LocationLookup>,
    completions: Sender<FetchCompletion>,
}

impl FetchDispatcher {
    /// Creates a dispatcher and the receiving end of its completion channel.
    pub fn new(lookup: Arc<dyn LocationLookup>) -> (Self, Receiver<FetchCompletion>) {
        let (completions, receiver) = mpsc::channel();
        (Self { lookup, completions }, receiver)
    }

    /// Starts `request` in the background. There is no cancellation; a
    /// result nobody wants any more is dropped by the session.
    ///
    /// If no worker thread can be started the request completes at once
    /// with a transport failure, so its level stays retryable.
    pub fn dispatch(&self, request: FetchRequest) {
        self.dispatch_with(request, |builder, job| builder.spawn(job).map(drop));
    }

    fn dispatch_with<S>(&self, request: FetchRequest, spawn: S)
    where
        S: FnOnce(thread::Builder, Job) -> io::Result<()>,
    {
        let lookup = Arc::clone(&self.lookup);
        let completions = self.completions.clone();
        let key = request.key.clone();
        let ticket = request.ticket;
        let builder = thread::Builder::new().name(format!("fetch-{}", ticket.0));

        let spawned = spawn(
            builder,
            Box::new(move || {
                let completion = request.run(lookup.as_ref());
                if completions.send(completion).is_err() {
                    debug!("completion receiver gone, dropping result");
                }
            }),
        );
        if let Err(err) = spawned {
            warn!(%key, %ticket, %err, "could not start fetch worker");
            let failed = FetchCompletion {
                key,
                ticket,
                outcome: Err(LookupFailure::Transport(err.to_string())),
            };
            if self.completions.send(failed).is_err() {
                debug!("completion receiver gone, dropping result");
            }
        }
    }

    pub fn dispatch_all(&self, requests: impl IntoIterator<Item = FetchRequest>) {
        for request in requests {
            self.dispatch(request);
        }
    }
}
