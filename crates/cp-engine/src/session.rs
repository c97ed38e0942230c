//! Per-session cluster selection state.

use cp_ir::{ClusterId, Plane, ReferenceMode, MAX_CLUSTERS};

/// Settings of one cluster for the current session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClusterSettings {
    pub mode: ReferenceMode,
    pub plane: Plane,
}

/// Which cluster is being edited and how each visited cluster is set up.
///
/// Settings for a cluster are created from `defaults` the first time it is
/// selected and kept until the session ends. Nothing here is written to the
/// parameter store.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    selected: Option<ClusterId>,
    settings: [Option<ClusterSettings>; MAX_CLUSTERS],
    defaults: ClusterSettings,
}

impl SessionState {
    pub fn new(defaults: ClusterSettings) -> Self {
        Self {
            selected: None,
            settings: [None; MAX_CLUSTERS],
            defaults,
        }
    }

    pub fn selected(&self) -> Option<ClusterId> {
        self.selected
    }

    /// Select a cluster. Returns false if it was already selected.
    pub fn select(&mut self, cluster: ClusterId) -> bool {
        let slot = &mut self.settings[cluster.slot()];
        if slot.is_none() {
            *slot = Some(self.defaults);
        }
        if self.selected == Some(cluster) {
            return false;
        }
        log::debug!("selected cluster {}", cluster);
        self.selected = Some(cluster);
        true
    }

    /// Clear the selection. Returns false if nothing was selected.
    pub fn deselect(&mut self) -> bool {
        self.selected.take().is_some()
    }

    /// Settings of the selected cluster, or the defaults with no selection.
    pub fn settings(&self) -> ClusterSettings {
        self.selected
            .and_then(|c| self.settings[c.slot()])
            .unwrap_or(self.defaults)
    }

    pub fn mode(&self) -> ReferenceMode {
        self.settings().mode
    }

    pub fn plane(&self) -> Plane {
        self.settings().plane
    }

    /// Set the reference mode of the selected cluster. Returns true if it changed.
    pub fn set_mode(&mut self, mode: ReferenceMode) -> bool {
        self.update(|s| s.mode = mode)
    }

    /// Set the active plane of the selected cluster. Returns true if it changed.
    pub fn set_plane(&mut self, plane: Plane) -> bool {
        self.update(|s| s.plane = plane)
    }

    fn update(&mut self, f: impl FnOnce(&mut ClusterSettings)) -> bool {
        let Some(cluster) = self.selected else {
            return false;
        };
        let Some(settings) = self.settings[cluster.slot()].as_mut() else {
            return false;
        };
        let before = *settings;
        f(settings);
        if *settings != before {
            log::debug!(
                "cluster {}: mode {}, plane {}",
                cluster,
                settings.mode.label(),
                settings.plane.label()
            );
            true
        } else {
            false
        }
    }
}
