use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Catalog with twins, a duplicate id, an empty review and a quoted name
pub const REVIEWS_CSV: &str = "\
item_reviewed,text,rating
Aurora Phone,\"Great battery life, the battery lasts two days\",5
Nimbus Phone,\"Battery life is great and charging is quick\",4
Volt Charger,\"Charging is quick, cable feels cheap\",3
Pixel Case,\"Cheap plastic case, cracked in a week\",1
Pixel Case Pro,\"Cheap plastic case, cracked in a week\",2
Aurora Phone,\"Screen is too dim outdoors\",3
Ghost Item,,2
\"13\"\" Sleeve\",\"Soft sleeve, fits snugly\",5
";

/// Get a Command for revsim isolated from the user's environment
pub fn revsim(config_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("revsim");
    cmd.env("REVSIM_CONFIG_DIR", config_dir)
        .env_remove("REVSIM_DATA")
        .env_remove("REVSIM_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// A plain process handle for revsim, for tests that talk to it while it runs
pub fn revsim_process(config_dir: &Path) -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_revsim"));
    cmd.env("REVSIM_CONFIG_DIR", config_dir)
        .env_remove("REVSIM_DATA")
        .env_remove("REVSIM_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// A temp directory holding `reviews.csv`
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_catalog("reviews.csv", REVIEWS_CSV)
    }

    pub fn with_catalog(name: &str, content: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(name), content).unwrap();
        Fixture { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// revsim running inside the fixture directory with `--data reviews.csv`
    pub fn cmd(&self) -> Command {
        let mut cmd = revsim(self.dir.path());
        cmd.current_dir(self.dir.path())
            .arg("--data")
            .arg(self.path("reviews.csv"));
        cmd
    }
}
