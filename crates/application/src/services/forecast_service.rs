//! Selection-driven forecast service
//!
//! One refresh reads both dropdowns, builds the forecast URL, shows the
//! station and a pending marker, fetches, then shows the result. Every
//! refresh is tagged with a generation number; a refresh that has been
//! overtaken by a newer one (or by [`ForecastService::cancel`]) drops its
//! result instead of writing it to the page.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::{
    API_CONTROL, Catalog, DATA_OUTPUT, DomainError, ForecastLifecycle, ForecastRequest,
    ForecastResult, Page, STATION_CONTROL, STATION_OUTPUT, Selection,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{ControlSource, ForecastPort, OutputSink};
use crate::services::render_sink::render_station_info;
use crate::services::selection_reader::read_selection;

/// Names of the controls and output elements a refresh works with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default = "default_station_control")]
    pub station_control: String,
    #[serde(default = "default_api_control")]
    pub api_control: String,
    #[serde(default = "default_station_output")]
    pub station_output: String,
    #[serde(default = "default_data_output")]
    pub data_output: String,
}

fn default_station_control() -> String {
    STATION_CONTROL.to_string()
}

fn default_api_control() -> String {
    API_CONTROL.to_string()
}

fn default_station_output() -> String {
    STATION_OUTPUT.to_string()
}

fn default_data_output() -> String {
    DATA_OUTPUT.to_string()
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            station_control: default_station_control(),
            api_control: default_api_control(),
            station_output: default_station_output(),
            data_output: default_data_output(),
        }
    }
}

impl PageLayout {
    /// Build a page for `catalog` using these control and output ids
    pub fn page(&self, catalog: &Catalog) -> Page {
        catalog.page_with(
            &self.station_control,
            &self.api_control,
            [self.station_output.as_str(), self.data_output.as_str()],
        )
    }
}

/// How a refresh ended
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The result was written to the data output
    Rendered(ForecastResult),
    /// A newer refresh or a cancel overtook this one; nothing was written
    Superseded,
}

/// Drives the selection -> URL -> fetch -> render lifecycle
pub struct ForecastService {
    port: Arc<dyn ForecastPort>,
    origin: String,
    layout: PageLayout,
    generation: AtomicU64,
    lifecycle: Mutex<ForecastLifecycle>,
}

impl fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastService")
            .field("origin", &self.origin)
            .field("layout", &self.layout)
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl ForecastService {
    /// Create a service fetching from `origin` with the default page layout
    pub fn new(port: Arc<dyn ForecastPort>, origin: impl Into<String>) -> Self {
        Self {
            port,
            origin: origin.into(),
            layout: PageLayout::default(),
            generation: AtomicU64::new(0),
            lifecycle: Mutex::new(ForecastLifecycle::new()),
        }
    }

    /// Use different control and output names
    #[must_use]
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub const fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Number of refreshes started or cancelled so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Snapshot of the current lifecycle
    pub fn lifecycle(&self) -> ForecastLifecycle {
        self.lifecycle.lock().clone()
    }

    /// Read both selections and build the request
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `EmptySelection` or `InvalidIdentifier`.
    pub fn prepare<S>(&self, source: &S) -> Result<(Selection, ForecastRequest), DomainError>
    where
        S: ControlSource + ?Sized,
    {
        let station = read_selection(source, &self.layout.station_control)?;
        let api = read_selection(source, &self.layout.api_control)?;
        let request = ForecastRequest::from_selections(&self.origin, &station, &api)?;
        Ok((station, request))
    }

    /// Run one full refresh against `page`
    ///
    /// The page lock is only held while reading selections and writing
    /// output, never across the fetch.
    ///
    /// # Errors
    ///
    /// Returns the construction error (after also writing it to the data
    /// output) or `TargetNotFound` if an output element is missing. Fetch
    /// failures are not errors: they are rendered and returned inside
    /// [`RefreshOutcome::Rendered`].
    #[instrument(skip(self, page), fields(origin = %self.origin))]
    pub async fn refresh<P>(&self, page: &Mutex<P>) -> Result<RefreshOutcome, ApplicationError>
    where
        P: ControlSource + OutputSink + Send,
    {
        let (generation, request) = {
            let mut page = page.lock();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

            let (station, request) = match self.prepare(&*page) {
                Ok(prepared) => prepared,
                Err(err) => {
                    warn!(error = %err, "Cannot build forecast request");
                    self.report(&mut *page, &err);
                    *self.lifecycle.lock() = ForecastLifecycle::new();
                    return Err(err.into());
                },
            };

            render_station_info(&mut *page, &self.layout.station_output, &station)?;
            render_station_info(&mut *page, &self.layout.data_output, &ForecastResult::pending())?;

            let mut lifecycle = ForecastLifecycle::new();
            lifecycle.start(request.clone())?;
            *self.lifecycle.lock() = lifecycle;
            (generation, request)
        };

        debug!(url = %request.url(), api = %request.api_id(), generation, "Fetching forecast");
        let result = self.port.fetch_forecast(request.url()).await;

        let mut page = page.lock();
        {
            // cancel() bumps the generation under this lock
            let mut lifecycle = self.lifecycle.lock();
            if self.generation() != generation {
                debug!(generation, "Forecast superseded, discarding result");
                return Ok(RefreshOutcome::Superseded);
            }
            lifecycle.settle(result.clone())?;
        }

        if let Some(message) = result.error_message() {
            warn!(url = %request.url(), error = %message, "Forecast fetch failed");
        }
        render_station_info(&mut *page, &self.layout.data_output, &result)?;
        Ok(RefreshOutcome::Rendered(result))
    }

    /// Supersede any in-flight refresh so it never writes to the page
    pub fn cancel(&self) {
        let mut lifecycle = self.lifecycle.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *lifecycle = ForecastLifecycle::new();
        drop(lifecycle);
        debug!(generation, "Forecast cancelled");
    }

    fn report<S>(&self, sink: &mut S, err: &DomainError)
    where
        S: OutputSink + ?Sized,
    {
        let result = ForecastResult::error(err.to_string());
        if let Err(render_err) = render_station_info(sink, &self.layout.data_output, &result) {
            debug!(error = %render_err, "No output element to report the error in");
        }
    }
}
