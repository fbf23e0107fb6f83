use anyhow::Result;
use serde::Deserialize;
use std::fmt;

/// Line counts the snapshot endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotLines {
    Last50,
    #[default]
    Last100,
    Last200,
    Last500,
}

impl SnapshotLines {
    pub const CHOICES: [u32; 4] = [50, 100, 200, 500];

    pub fn count(self) -> u32 {
        match self {
            SnapshotLines::Last50 => 50,
            SnapshotLines::Last100 => 100,
            SnapshotLines::Last200 => 200,
            SnapshotLines::Last500 => 500,
        }
    }

    pub fn from_count(count: u32) -> Option<Self> {
        match count {
            50 => Some(SnapshotLines::Last50),
            100 => Some(SnapshotLines::Last100),
            200 => Some(SnapshotLines::Last200),
            500 => Some(SnapshotLines::Last500),
            _ => None,
        }
    }

    /// Cycle to the next allowed count (for the TUI selector).
    pub fn cycle(self) -> Self {
        match self {
            SnapshotLines::Last50 => SnapshotLines::Last100,
            SnapshotLines::Last100 => SnapshotLines::Last200,
            SnapshotLines::Last200 => SnapshotLines::Last500,
            SnapshotLines::Last500 => SnapshotLines::Last50,
        }
    }
}

impl fmt::Display for SnapshotLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Container summary as returned by the platform API.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ContainerSummary {
    pub fn is_running(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("running"))
    }
}

/// Client for the platform's HTTP API.
///
/// Carries an already-issued bearer token; authentication bootstrap is the
/// platform's concern, not ours. Every call is independent and stateless,
/// and a failed call never disturbs anything already displayed.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(server_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: format!("{}/api", server_url.trim_end_matches('/')),
            token,
        }
    }

    fn get(&self, path: &str) -> ureq::Request {
        let request = ureq::get(&format!("{}{}", self.base_url, path))
            .set("User-Agent", concat!("sandtail/", env!("CARGO_PKG_VERSION")));
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    /// List the containers the platform knows about.
    pub fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        let containers: Vec<ContainerSummary> = self
            .get("/containers")
            .call()
            .map_err(|e| anyhow::anyhow!("Failed to list containers: {}", e))?
            .into_json()?;
        Ok(containers)
    }

    /// Fetch up to `lines` of the most recent logs for a container.
    ///
    /// One request, no state retained between calls. A shorter history
    /// returns fewer lines; that is valid, not an error.
    pub fn fetch_logs(&self, container_id: i64, lines: SnapshotLines) -> Result<Vec<String>> {
        let logs: Vec<String> = self
            .get(&format!("/containers/{}/logs?lines={}", container_id, lines.count()))
            .call()
            .map_err(|e| anyhow::anyhow!("Failed to fetch logs: {}", e))?
            .into_json()?;
        Ok(logs)
    }
}
