use super::*;
use pretty_assertions::assert_eq;
use weave_eval::Interpolator;
use weave_ir::{Name, ScopeFrame, Value};

struct Fixture {
    template: tempfile::TempDir,
    destination: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Fixture {
            template: tempfile::tempdir().unwrap(),
            destination: tempfile::tempdir().unwrap(),
        };
        fs::write(fixture.template.path().join("greet.jinja"), "Hello {{ who }}").unwrap();
        fs::write(fixture.template.path().join("raw.txt"), "Hello {{ who }}").unwrap();
        fixture
    }

    fn plan(&self) -> Plan {
        let frame = ScopeFrame::root([(Name::new("who"), Value::string("world"))]);
        let entry = |path: &str, kind, source: &str, render| PlannedEntry {
            path: PathBuf::from(path),
            kind,
            source: PathBuf::from(source),
            frame: frame.clone(),
            render,
        };
        Plan {
            template: self.template.path().to_path_buf(),
            entries: vec![
                entry("sub", NodeKind::Directory, "sub", false),
                entry("sub/greet", NodeKind::File, "greet.jinja", true),
                entry("raw.txt", NodeKind::File, "raw.txt", false),
            ],
            interpolator: Interpolator::default(),
        }
    }

    fn read(&self, path: &str) -> String {
        fs::read_to_string(self.destination.path().join(path)).unwrap()
    }
}

#[test]
fn test_renders_templates_and_copies_the_rest() {
    let fixture = Fixture::new();
    let report = materialize(&fixture.plan(), fixture.destination.path(), false, false).unwrap();

    assert_eq!(report.directories, vec![PathBuf::from("sub")]);
    assert_eq!(
        report.written,
        vec![PathBuf::from("sub/greet"), PathBuf::from("raw.txt")]
    );
    assert!(report.skipped.is_empty());
    assert_eq!(fixture.read("sub/greet"), "Hello world");
    assert_eq!(fixture.read("raw.txt"), "Hello {{ who }}");
}

#[test]
fn test_existing_files_are_skipped_unless_overwrite() {
    let fixture = Fixture::new();
    fs::write(fixture.destination.path().join("raw.txt"), "mine").unwrap();

    let report = materialize(&fixture.plan(), fixture.destination.path(), false, false).unwrap();
    assert_eq!(report.skipped, vec![PathBuf::from("raw.txt")]);
    assert_eq!(fixture.read("raw.txt"), "mine");

    let report = materialize(&fixture.plan(), fixture.destination.path(), true, false).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(fixture.read("raw.txt"), "Hello {{ who }}");
}

#[test]
fn test_pretend_writes_nothing() {
    let fixture = Fixture::new();
    let destination = fixture.destination.path().join("out");
    let report = materialize(&fixture.plan(), &destination, false, true).unwrap();

    assert_eq!(report.written.len(), 2);
    assert!(!destination.exists());
}

#[test]
fn test_missing_source_is_io_error() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.template.path().join("raw.txt")).unwrap();
    let err = materialize(&fixture.plan(), fixture.destination.path(), false, false).unwrap_err();
    assert!(matches!(err, GenerateError::Io { .. }));
}
