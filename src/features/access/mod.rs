//! # Access Feature
//!
//! Shared-passphrase gate in front of the whole app.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: true

use log::{info, warn};

/// Wrong guesses allowed before the front end gives up
pub const MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Clone)]
pub struct AccessGate {
    passphrase: Option<String>,
}

impl AccessGate {
    /// `None` leaves the gate open
    pub fn new(passphrase: Option<String>) -> Self {
        Self { passphrase }
    }

    pub fn is_open(&self) -> bool {
        self.passphrase.is_none()
    }

    /// Exact match only; surrounding whitespace counts.
    pub fn verify(&self, attempt: &str) -> bool {
        match &self.passphrase {
            None => true,
            Some(expected) => {
                let ok = constant_time_eq(expected.as_bytes(), attempt.as_bytes());
                if ok {
                    info!("Access granted");
                } else {
                    warn!("Incorrect password");
                }
                ok
            }
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_gate_accepts_anything() {
        let gate = AccessGate::new(None);
        assert!(gate.is_open());
        assert!(gate.verify(""));
        assert!(gate.verify("whatever"));
    }

    #[test]
    fn test_exact_passphrase_only() {
        let gate = AccessGate::new(Some("argos123".to_string()));
        assert!(!gate.is_open());
        assert!(gate.verify("argos123"));
        assert!(!gate.verify("argos12"));
        assert!(!gate.verify("argos1234"));
        assert!(!gate.verify(" argos123"));
        assert!(!gate.verify("ARGOS123"));
        assert!(!gate.verify(""));
    }
}
