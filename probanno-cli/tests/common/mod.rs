#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const TARGET_ROLES: &str = "\
# target\troles
t1\tR1
t2\tR1///R2
t3\tR3
t4\tR4
";

pub const COMPLEX_ROLES: &str = "\
C1\tR1///R2
C2\tR3
C3\tR1///R4
C4\tR4
C5\tR9
C6\tR4///R9
";

pub const REACTION_COMPLEXES: &str = "\
rxn1\tC1///C2
rxn2\tC3///C4
rxn3\tC99
rxn4\tC2///C3
";

/// One BLAST `-outfmt 6` record with the given e-value.
pub fn hit_record(query: &str, target: &str, evalue: &str) -> String {
    format!("{query}\t{target}\t97.1\t312\t9\t0\t1\t312\t1\t312\t{evalue}\t601\n")
}

pub fn hits() -> String {
    [
        hit_record("g1", "t1", "1e-20"),
        hit_record("g1", "t2", "1e-10"),
        hit_record("g2", "t3", "1e-30"),
        hit_record("g3", "tX", "1e-5"),
    ]
    .concat()
}

/// Reference tables and a hit file laid out in a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub hits: PathBuf,
    pub target_roles: PathBuf,
    pub complex_roles: PathBuf,
    pub reaction_complexes: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_hits(&hits())
    }

    pub fn with_hits(hits: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let write = |name: &str, content: &str| -> PathBuf {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        };
        Self {
            hits: write("genome.tsv", hits),
            target_roles: write("target_roles.tsv", TARGET_ROLES),
            complex_roles: write("complex_roles.tsv", COMPLEX_ROLES),
            reaction_complexes: write("reaction_complexes.tsv", REACTION_COMPLEXES),
            dir,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `probanno` with the reference tables already passed.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("probanno").unwrap();
        cmd.arg("-r")
            .arg(&self.target_roles)
            .arg("-c")
            .arg(&self.complex_roles)
            .arg("-x")
            .arg(&self.reaction_complexes);
        cmd
    }

    /// Runs on the fixture hit file and returns stdout.
    pub fn run(&self, extra_args: &[&str]) -> String {
        let mut cmd = self.command();
        cmd.arg("-i").arg(&self.hits).args(extra_args);
        let output = cmd.assert().success().get_output().stdout.clone();
        String::from_utf8(output).unwrap()
    }
}
