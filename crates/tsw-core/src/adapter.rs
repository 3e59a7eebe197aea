// ── Adapter ──
//
// Poll-cycle orchestration and command dispatch for one panel. A single
// async mutex serializes polls, commands and command batches; the adapter
// spawns no background tasks of its own.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use tsw_api::endpoint::DISPLAY;
use tsw_api::models::DisplayUpdate;
use tsw_api::{Credentials, PanelClient, ResponseShape, Session};

use crate::command::{self, Command, ControlValue};
use crate::config::AdapterConfig;
use crate::error::CoreError;
use crate::fetch_state::FetchState;
use crate::groups::PropertyGroup;
use crate::projector::{self, AdapterMetadata, ControllableProperty, DeviceSnapshot, Statistics};

/// Output of a successful poll cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub statistics: Statistics,
    pub controls: Vec<ControllableProperty>,
}

/// Result of fetching one section.
#[derive(Debug)]
enum Fetch<T> {
    /// The panel answered. `None` means it has no data for the section.
    Loaded(Option<T>),
    /// The fetch failed and was recorded; the previous value stands.
    Failed,
}

impl<T> Fetch<T> {
    fn store_into(self, slot: &mut Option<T>) {
        if let Self::Loaded(value) = self {
            *slot = value;
        }
    }
}

// ── Adapter ──────────────────────────────────────────────────────

/// Monitor and control adapter for a single touch panel.
///
/// Cheaply cloneable via `Arc<AdapterInner>`.
#[derive(Clone)]
pub struct Adapter {
    inner: Arc<AdapterInner>,
}

struct AdapterInner {
    config: AdapterConfig,
    client: PanelClient,
    credentials: Credentials,
    started: Instant,
    state: Mutex<AdapterState>,
}

/// Everything a poll or command mutates.
struct AdapterState {
    session: Session,
    tracker: FetchState,
    snapshot: DeviceSnapshot,
    report: Option<Report>,
}

impl Adapter {
    /// Build an adapter from `config`. Does no I/O.
    pub fn new(config: AdapterConfig) -> Result<Self, CoreError> {
        let base_url = config.base_url()?;
        let client = PanelClient::new(base_url, &config.transport())?;
        Ok(Self::with_client(config, client))
    }

    /// Build an adapter around an existing client.
    pub fn with_client(config: AdapterConfig, client: PanelClient) -> Self {
        let session = Session::new(client.base_url());
        let credentials = config.credentials();
        Self {
            inner: Arc::new(AdapterInner {
                config,
                client,
                credentials,
                started: Instant::now(),
                state: Mutex::new(AdapterState {
                    session,
                    tracker: FetchState::new(),
                    snapshot: DeviceSnapshot::default(),
                    report: None,
                }),
            }),
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.inner.config
    }

    /// The report published by the last successful poll.
    pub async fn last_report(&self) -> Option<Report> {
        self.inner.state.lock().await.report.clone()
    }

    /// Establish a session with the panel. Does no I/O once established.
    pub async fn authenticate(&self) -> Result<(), CoreError> {
        let mut state = self.inner.state.lock().await;
        self.authenticate_locked(&mut state).await
    }

    // ── Poll cycle ───────────────────────────────────────────────

    /// Run one poll cycle: fetch every enabled group and publish a report.
    ///
    /// A failing endpoint keeps its previous value as long as at least one
    /// endpoint succeeded; if all of them failed the cycle errors with
    /// [`CoreError::AggregateFetch`] and the previous report stays published.
    pub async fn poll(&self) -> Result<Report, CoreError> {
        let mut state = self.inner.state.lock().await;
        self.authenticate_locked(&mut state).await?;
        state.tracker.clear();

        let groups = &self.inner.config.groups;
        for group in PropertyGroup::selectable().filter(|g| groups.is_enabled(*g)) {
            match group {
                PropertyGroup::General => {
                    self.fetch_resource(&mut state, ResponseShape::DeviceInfo)
                        .await?
                        .store_into(&mut state.snapshot.device_info);
                }
                PropertyGroup::Capabilities => {
                    self.fetch_resource(&mut state, ResponseShape::DeviceCapabilities)
                        .await?
                        .store_into(&mut state.snapshot.capabilities);
                }
                PropertyGroup::SystemVersions => {
                    self.fetch_resource(&mut state, ResponseShape::SystemVersions)
                        .await?
                        .store_into(&mut state.snapshot.system_versions);
                }
                PropertyGroup::Network => {
                    self.fetch_resource(&mut state, ResponseShape::NetworkAdapters)
                        .await?
                        .store_into(&mut state.snapshot.network);
                }
                PropertyGroup::Display => {
                    self.fetch_resource(&mut state, ResponseShape::Display)
                        .await?
                        .store_into(&mut state.snapshot.display);
                }
                PropertyGroup::AdapterMetadata => {}
            }
        }

        debug!(
            sent = ?state.tracker.sent().collect::<Vec<_>>(),
            "poll requests issued"
        );
        state.tracker.verify()?;

        let report = self.project(&state.snapshot);
        debug!(
            statistics = report.statistics.len(),
            controls = report.controls.len(),
            "poll cycle complete"
        );
        state.report = Some(report.clone());
        Ok(report)
    }

    /// Fetch one section, re-authenticating once if the panel rejects the
    /// session.
    ///
    /// Only a failed re-login or an unreachable panel propagates. An endpoint
    /// that still refuses the fresh session is recorded in the tracker like
    /// any other per-endpoint failure and yields [`Fetch::Failed`].
    async fn fetch_resource<T: DeserializeOwned>(
        &self,
        state: &mut AdapterState,
        shape: ResponseShape,
    ) -> Result<Fetch<T>, CoreError> {
        let endpoint = shape.endpoint();
        state.tracker.push_request(endpoint);

        let client = &self.inner.client;
        let first = client.fetch::<T>(&state.session, shape).await;
        let result = match first {
            Err(e) if e.is_auth() => {
                warn!(endpoint, error = %e, "panel rejected session, re-authenticating");
                state.session.invalidate();
                self.authenticate_locked(state).await?;
                client.fetch::<T>(&state.session, shape).await
            }
            other => other,
        };

        match result {
            Ok(value) => {
                if state.tracker.is_failing(endpoint) {
                    info!(endpoint, "endpoint recovered");
                }
                state.tracker.resolve(endpoint);
                Ok(Fetch::Loaded(value))
            }
            Err(e) if e.is_unreachable() => Err(e.into()),
            Err(e) => {
                error!(endpoint, status = e.status(), error = %e, "failed to fetch panel data");
                state.tracker.push(endpoint, e);
                Ok(Fetch::Failed)
            }
        }
    }

    fn project(&self, snapshot: &DeviceSnapshot) -> Report {
        let config = &self.inner.config;
        let metadata = AdapterMetadata {
            version: env!("CARGO_PKG_VERSION"),
            build_date: option_env!("TSW_BUILD_DATE"),
            uptime: self.inner.started.elapsed(),
            active_groups: config.groups.to_string(),
        };

        let display = if config.groups.is_enabled(PropertyGroup::Display) {
            snapshot.display.as_ref()
        } else {
            None
        };

        Report {
            statistics: projector::statistics(snapshot, &config.groups, &metadata),
            controls: projector::controls(display),
        }
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Apply a single `Group#Property = value` command.
    pub async fn apply_command(&self, name: &str, value: &ControlValue) -> Result<(), CoreError> {
        let mut state = self.inner.state.lock().await;
        self.apply_locked(&mut state, name, value).await
    }

    /// Apply commands in order under one lock, stopping at the first failure.
    pub async fn apply_commands(&self, commands: &[Command]) -> Result<(), CoreError> {
        if commands.is_empty() {
            warn!("empty command batch, nothing to apply");
            return Ok(());
        }

        let mut state = self.inner.state.lock().await;
        for cmd in commands {
            self.apply_locked(&mut state, &cmd.name, &cmd.value).await?;
        }
        Ok(())
    }

    async fn apply_locked(
        &self,
        state: &mut AdapterState,
        name: &str,
        value: &ControlValue,
    ) -> Result<(), CoreError> {
        let update = command::translate(name, value)?;
        self.authenticate_locked(state).await?;
        self.post_display(state, &update).await?;
        info!(property = name, %value, "control applied");
        Ok(())
    }

    async fn post_display(
        &self,
        state: &mut AdapterState,
        update: &DisplayUpdate,
    ) -> Result<(), CoreError> {
        let client = &self.inner.client;
        let first = client.post_json(&state.session, DISPLAY, update).await;
        let result = match first {
            Err(e) if e.is_auth() => {
                warn!(error = %e, "panel rejected session on update, re-authenticating");
                state.session.invalidate();
                self.authenticate_locked(state).await?;
                client.post_json(&state.session, DISPLAY, update).await
            }
            other => other,
        };
        result.map_err(CoreError::from)
    }

    // ── Session ──────────────────────────────────────────────────

    async fn authenticate_locked(&self, state: &mut AdapterState) -> Result<(), CoreError> {
        self.inner
            .client
            .authenticate(&mut state.session, &self.inner.credentials)
            .await
            .map_err(CoreError::from)
    }

    /// Drop the session and all collected state.
    pub async fn shutdown(&self) {
        let mut state = self.inner.state.lock().await;
        state.session.clear();
        state.tracker.reset();
        state.snapshot = DeviceSnapshot::default();
        state.report = None;
        debug!("adapter shut down");
    }
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("base_url", &self.inner.client.base_url().as_str())
            .field("groups", &self.inner.config.groups.to_string())
            .finish_non_exhaustive()
    }
}
