use dockaudit_core::{FixKind, Severity};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const HEADER: &str = "\x1b[1;38;2;142;192;124m";
pub const SELECTED: &str = "\x1b[1;30;48;2;131;165;152m";
pub const MUTED: &str = "\x1b[38;2;146;131;116m";
pub const RULE: &str = "\x1b[38;2;80;73;69m";

// Config-snippet highlight palette.
pub const CFG_KEY: &str = "\x1b[38;2;142;192;124m";
pub const CFG_STRING: &str = "\x1b[38;2;184;187;38m";
pub const CFG_NUMBER: &str = "\x1b[38;2;211;134;155m";
pub const CFG_BOOL: &str = "\x1b[38;2;254;128;25m";
pub const CFG_ARRAY: &str = "\x1b[38;2;250;189;47m";

pub mod icons {
    pub const ERROR: &str = "x";
    pub const WARNING: &str = "!";
    pub const INFO: &str = "i";
}

pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => icons::ERROR,
        Severity::Warning => icons::WARNING,
        Severity::Info => icons::INFO,
    }
}

pub fn severity_style(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[38;2;251;73;52m",
        Severity::Warning => "\x1b[38;2;250;189;47m",
        Severity::Info => "\x1b[38;2;131;165;152m",
    }
}

pub fn fix_kind_style(kind: FixKind) -> &'static str {
    match kind {
        FixKind::Auto => "\x1b[38;2;184;187;38m",
        FixKind::Manual => "\x1b[38;2;250;189;47m",
    }
}
