// Unit tests for facade generation

mod test_collector;
mod test_discovery;
mod test_render_rust;

use crate::diagnostics::DiagnosticCollector;
use crate::discovery::{discover, Discovery};

/// Parse `source` as one definition file and run discovery over it
pub(crate) fn discover_source(source: &str) -> (Discovery, DiagnosticCollector) {
    let file = staticapi_parser::parse_file_with_source(source, Some("test.sapi".to_string()))
        .expect("test source should parse");
    let mut collector = DiagnosticCollector::new();
    collector.add_source("test.sapi", source);
    let discovery = discover(&[file], &mut collector);
    (discovery, collector)
}
