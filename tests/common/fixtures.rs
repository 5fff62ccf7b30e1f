use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use savor::config::{AgentBackend, Config, ReplyCeilings};

/// Two Subway reviews with clear cues: (food 5, service 4) and (food 2, service 1).
pub const SUBWAY_LINES: &[&str] = &[
    "Subway. The food was amazing and the customer service was good.",
    "subway: Bad sandwiches and awful service, the staff ignored us.",
];

pub const OTHER_LINES: &[&str] = &[
    "McDonald's. The food was good, the service was average.",
    "In N Out | Incredible burgers, awesome service.",
    "",
    "   ",
];

/// Overall score for [`SUBWAY_LINES`].
pub const SUBWAY_SCORE: f64 = 5.367;

/// Writes `lines` to a temporary review file.
pub fn review_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp review file");
    for line in lines {
        writeln!(file, "{line}").expect("write review line");
    }
    file.flush().expect("flush review file");
    file
}

/// The standard fixture: Subway reviews interleaved with other restaurants.
pub fn sample_review_file() -> NamedTempFile {
    let mut lines = Vec::new();
    lines.push(SUBWAY_LINES[0]);
    lines.extend_from_slice(OTHER_LINES);
    lines.push(SUBWAY_LINES[1]);
    review_file(&lines)
}

/// Offline configuration over `path`.
pub fn offline_config(path: &Path) -> Config {
    Config {
        data_path: path.to_path_buf(),
        reply_ceilings: ReplyCeilings::uniform(3),
        agent_backend: AgentBackend::Offline,
        ..Config::default()
    }
}
