//! Regenerates `src/generated` from the Access Approval `.proto` sources.
//!
//! ```text
//! cargo run --features gen-proto --bin generate-access-approval           # rewrite in place
//! cargo run --features gen-proto --bin generate-access-approval -- --check  # fail when stale
//! ```
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const PACKAGE_FILE: &str = "google.cloud.accessapproval.v1.rs";
const PROTO: &str = "google/cloud/accessapproval/v1/accessapproval.proto";

struct Layout {
    proto_root: PathBuf,
    generated_dir: PathBuf,
}

impl Layout {
    fn of_this_crate() -> Self {
        let crate_root = Path::new(env!("CARGO_MANIFEST_DIR"));
        Self {
            proto_root: crate_root.join("proto"),
            generated_dir: crate_root.join("src").join("generated"),
        }
    }

    /// Compiles the service's messages into `dir`.
    ///
    /// No client or server stubs: calls are bound by `UnaryCall` with the message codecs.
    fn compile_into(&self, dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
        fs::create_dir_all(dir)?;

        tonic_prost_build::configure()
            .build_client(false)
            .build_server(false)
            .out_dir(dir)
            .compile_protos(&[self.proto_root.join(PROTO)], &[&self.proto_root])?;

        Ok(dir.join(PACKAGE_FILE))
    }
}

/// Compiles into a scratch directory and compares with the checked-in module.
fn is_up_to_date(layout: &Layout) -> Result<bool, Box<dyn Error>> {
    let scratch = std::env::temp_dir().join(format!("access-approval-gen-{}", std::process::id()));
    let fresh = layout.compile_into(&scratch)?;

    let up_to_date = fs::read(&fresh)? == fs::read(layout.generated_dir.join(PACKAGE_FILE))?;
    fs::remove_dir_all(&scratch)?;

    Ok(up_to_date)
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let layout = Layout::of_this_crate();

    if std::env::args().skip(1).any(|arg| arg == "--check") {
        if is_up_to_date(&layout)? {
            println!("{PACKAGE_FILE} is up to date");
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!("{PACKAGE_FILE} is stale, rerun without --check");
        return Ok(ExitCode::FAILURE);
    }

    let written = layout.compile_into(&layout.generated_dir)?;
    println!("Wrote {}", written.display());

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_points_at_the_checked_in_sources() {
        let layout = Layout::of_this_crate();

        assert!(layout.proto_root.join(PROTO).is_file());
        assert!(layout.generated_dir.join(PACKAGE_FILE).is_file());
    }
}
