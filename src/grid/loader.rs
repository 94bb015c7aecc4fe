//! Page loading state machine
//!
//! ```text
//! Idle ──request_next_page()──▶ Loading ──complete()──▶ Idle
//! ```
//!
//! Single-flight: while a request is outstanding, further requests are dropped,
//! not queued. A reset bumps the generation so responses for the previous
//! generation are discarded when they eventually arrive.

use crate::model::Row;
use crate::source::FetchError;

/// One page fetch, as issued to the data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Loader generation at issue time (bumped by reset)
    pub generation: u64,
    /// Issue sequence number, unique per loader
    pub seq: u64,
    /// Rows already loaded when the request was issued
    pub offset: usize,
    /// Number of rows asked for
    pub rows: usize,
    /// Ask the server for the reduced payload
    pub less_rows: bool,
}

/// Result of a page fetch, routed back to the loader that issued it
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub generation: u64,
    pub seq: u64,
    pub result: Result<Vec<Row>, FetchError>,
}

impl PageResponse {
    pub fn for_request(request: &PageRequest, result: Result<Vec<Row>, FetchError>) -> Self {
        Self {
            generation: request.generation,
            seq: request.seq,
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading(PageRequest),
}

/// How a response relates to the loader's current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Matches the in-flight request; the loader is idle again
    Accepted(PageRequest),
    /// From an older generation or not the outstanding request
    Stale,
}

#[derive(Debug, Clone)]
pub struct PageLoader {
    state: LoadState,
    page_size: usize,
    total_rows: usize,
    less_rows: bool,
    generation: u64,
    next_seq: u64,
}

impl PageLoader {
    pub fn new(page_size: usize, total_rows: usize, less_rows: bool) -> Self {
        Self {
            state: LoadState::Idle,
            page_size: page_size.max(1),
            total_rows,
            less_rows,
            generation: 0,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading(_))
    }

    pub fn in_flight(&self) -> Option<&PageRequest> {
        match &self.state {
            LoadState::Loading(request) => Some(request),
            LoadState::Idle => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Rows still available on the server
    pub fn remaining(&self, loaded: usize) -> usize {
        self.total_rows.saturating_sub(loaded)
    }

    /// More rows exist beyond `loaded`
    pub fn has_more(&self, loaded: usize) -> bool {
        loaded < self.total_rows
    }

    /// A request would be issued right now
    pub fn can_load(&self, loaded: usize) -> bool {
        !self.is_loading() && self.has_more(loaded)
    }

    /// Issue the next page request, or `None` if one is in flight or nothing is left
    pub fn request_next_page(&mut self, loaded: usize) -> Option<PageRequest> {
        if let LoadState::Loading(request) = &self.state {
            tracing::debug!(
                "Dropping page request: seq {} still in flight",
                request.seq
            );
            return None;
        }
        if !self.has_more(loaded) {
            tracing::debug!(
                "No page request: {} of {} rows loaded",
                loaded,
                self.total_rows
            );
            return None;
        }

        let request = PageRequest {
            generation: self.generation,
            seq: self.next_seq,
            offset: loaded,
            rows: self.page_size.min(self.remaining(loaded)),
            less_rows: self.less_rows,
        };
        self.next_seq += 1;
        self.state = LoadState::Loading(request.clone());

        tracing::debug!(
            "Requesting page seq={} gen={} rows={} offset={}",
            request.seq,
            request.generation,
            request.rows,
            request.offset
        );
        Some(request)
    }

    /// Match a response against the outstanding request
    pub fn complete(&mut self, generation: u64, seq: u64) -> Completion {
        match &self.state {
            LoadState::Loading(request)
                if request.generation == generation && request.seq == seq =>
            {
                let request = request.clone();
                self.state = LoadState::Idle;
                Completion::Accepted(request)
            }
            _ => {
                tracing::debug!(
                    "Discarding stale page response seq={} gen={} (current gen {})",
                    seq,
                    generation,
                    self.generation
                );
                Completion::Stale
            }
        }
    }

    /// Forget the in-flight request and start a new generation
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoadState::Idle;
    }
}
