/// Static access code check guarding the wizard
#[derive(Debug, Clone)]
pub struct AccessGate {
    code: String,
}

impl AccessGate {
    /// Create a gate that accepts exactly `code`
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Exact string comparison, no trimming
    pub fn check(&self, input: &str) -> bool {
        input == self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_is_exact() {
        let gate = AccessGate::new("mysecretcode");

        assert!(gate.check("mysecretcode"));
        assert!(!gate.check("mysecretcode "));
        assert!(!gate.check("MYSECRETCODE"));
        assert!(!gate.check(""));
    }
}
