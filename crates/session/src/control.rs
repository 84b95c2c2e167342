/// Per-kind trigger control state.
///
/// While a session is active the control shows its waiting label and is
/// disabled; re-entrant triggers are dropped. Restored to idle on every
/// session exit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerControl {
    idle_label: String,
    wait_label: String,
    waiting: bool,
}

impl TriggerControl {
    pub fn new(idle_label: impl Into<String>) -> Self {
        Self {
            idle_label: idle_label.into(),
            wait_label: "Wait…".to_string(),
            waiting: false,
        }
    }

    pub fn set_waiting(&mut self) {
        self.waiting = true;
    }

    pub fn set_idle(&mut self) {
        self.waiting = false;
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn is_enabled(&self) -> bool {
        !self.waiting
    }

    pub fn label(&self) -> &str {
        if self.waiting {
            &self.wait_label
        } else {
            &self.idle_label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TriggerControl;

    #[test]
    fn label_toggles_with_waiting_state() {
        let mut control = TriggerControl::new("Show my streets");
        assert_eq!(control.label(), "Show my streets");
        assert!(control.is_enabled());

        control.set_waiting();
        assert_eq!(control.label(), "Wait…");
        assert!(!control.is_enabled());

        control.set_idle();
        assert_eq!(control.label(), "Show my streets");
    }
}
