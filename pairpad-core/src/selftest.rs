//! Start-up regression checks for the diff generator and classifier.
//!
//! `run` evaluates a fixed list of assertions and reports a pass/fail label
//! for each. It never panics and touches no session state; the front end logs
//! the report once at start-up.

use std::fmt;

use crate::diff::{classify, unified_diff};
use crate::types::DiffLineKind;

/// Outcome of one named assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestCheck {
    pub name: &'static str,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfTestReport {
    pub checks: Vec<SelfTestCheck>,
}

impl SelfTestReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SelfTestCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    fn ok(&mut self, name: &'static str, passed: bool) {
        self.checks.push(SelfTestCheck { name, passed });
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, check) in self.checks.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            let mark = if check.passed { '✓' } else { '✗' };
            write!(f, "{mark} {}", check.name)?;
        }
        Ok(())
    }
}

/// True when any line of `diff` starts with `+` or `-`.
pub fn has_change_lines(diff: &str) -> bool {
    diff.lines().any(|l| l.starts_with(['+', '-']))
}

/// Runs every check and returns the report.
pub fn run() -> SelfTestReport {
    let mut report = SelfTestReport::default();

    let d1 = unified_diff("a\nb", "a\nb");
    report.ok("identical -> no +/-", !has_change_lines(&d1));

    let d2 = unified_diff("a", "a\nb");
    report.ok("addition -> +b present", d2.ends_with("\n+b\n") || d2.ends_with("\n+b"));

    let d3 = unified_diff("a\nb", "a");
    report.ok("deletion -> -b present", d3.contains("\n-b\n"));

    let d4 = unified_diff("a", "z");
    let modified = match (d4.find("-a"), d4.rfind("+z")) {
        (Some(del), Some(add)) => del < add,
        _ => false,
    };
    report.ok("modify -> has -a and +z", modified);

    report.ok("class meta", classify("@@ -1 +1 @@") == DiffLineKind::Meta);
    report.ok("class add", classify("+x") == DiffLineKind::Add);
    report.ok("class del", classify("-x") == DiffLineKind::Del);
    report.ok("class ctx", classify(" x") == DiffLineKind::Context);

    let d0 = unified_diff("", "");
    report.ok("empty-> no +/-", !has_change_lines(&d0));
    report.ok("empty-> has meta header", d0.starts_with("@@ "));

    let d5 = unified_diff("a", "a\n");
    report.ok("trailing newline -> no +/-", !has_change_lines(&d5));

    let d6 = unified_diff("a\nb\nc", "a\nx\nc");
    report.ok("middle change -> -b present", d6.contains("\n-b\n"));
    report.ok("middle change -> +x present", d6.contains("\n+x\n"));

    report
}
