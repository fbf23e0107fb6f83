use super::LogLine;

/// Two-partition store for lines received from a live stream.
///
/// `visible` holds lines that are rendered and export-ready; `held` holds
/// lines that arrived while the viewer was paused. The concatenation
/// `visible ++ held` is always the full set of non-sentinel lines received
/// since the last `clear`, in arrival order.
#[derive(Debug, Default)]
pub struct LineBuffer {
    visible: Vec<LogLine>,
    held: Vec<LogLine>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_visible(&mut self, line: LogLine) {
        self.visible.push(line);
    }

    pub fn push_held(&mut self, line: LogLine) {
        self.held.push(line);
    }

    /// Move every held line to the tail of the visible partition, in
    /// original arrival order. No-op when nothing is held.
    pub fn resume_merge(&mut self) {
        self.visible.append(&mut self.held);
    }

    /// Empty both partitions. Independent of pause and connection state.
    pub fn clear(&mut self) {
        self.visible.clear();
        self.held.clear();
    }

    pub fn visible(&self) -> &[LogLine] {
        &self.visible
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn held_len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.held.is_empty()
    }

    /// Newline-joined `visible ++ held`, evaluated at call time.
    ///
    /// Held lines are included so that pausing never causes silent data
    /// loss in an export.
    pub fn export_text(&self) -> String {
        self.visible
            .iter()
            .chain(self.held.iter())
            .map(|log| log.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Boolean gate deciding which partition an incoming line lands in.
///
/// Pausing never stops ingestion, it only redirects rendering: lines keep
/// arriving into `held` and are merged back on resume, so the consumer can
/// pause indefinitely without losing data. This is not a flow-control
/// signal to the producer.
#[derive(Debug, Default)]
pub struct PauseController {
    paused: bool,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Route one incoming line into the buffer according to the gate.
    pub fn route(&self, buffer: &mut LineBuffer, line: LogLine) {
        if self.paused {
            buffer.push_held(line);
        } else {
            buffer.push_visible(line);
        }
    }

    /// Flip the gate. On the paused -> unpaused transition, atomically
    /// merge all held lines into the visible partition.
    pub fn toggle(&mut self, buffer: &mut LineBuffer) {
        self.paused = !self.paused;
        if !self.paused {
            buffer.resume_merge();
        }
    }
}
