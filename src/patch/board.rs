//! Build the ath10k `board-2.bin` from a single board data file
//!
//! The board entry is keyed by chip ID rather than board ID: the board ID
//! reported by the WCN3990 (0xff) is shared across chips and is not usable
//! for matching.

use std::ffi::OsStr;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::context::ExecutionContext;
use crate::error::{FwError, Result, fs::step_failed};
use crate::logger::Logger;
use crate::tool::ExternalTool;

use super::Patch;

/// One entry of the encoder's JSON board specification
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BoardEntry {
    pub data: String,
    pub names: Vec<String>,
}

/// Encodes one board data file into a `board-2.bin` bundle, then removes
/// the directory of individual board files
#[derive(Debug, Clone)]
pub struct BoardRepack {
    boards_dir: PathBuf,
    board_file: String,
    board_name: String,
    output: PathBuf,
    encoder: ExternalTool,
}

impl BoardRepack {
    /// `boards_dir` and `output` are relative to the output root
    pub fn new(
        boards_dir: impl Into<PathBuf>,
        board_file: impl Into<String>,
        board_name: impl Into<String>,
        output: impl Into<PathBuf>,
        encoder: ExternalTool,
    ) -> Self {
        Self {
            boards_dir: boards_dir.into(),
            board_file: board_file.into(),
            board_name: board_name.into(),
            output: output.into(),
            encoder,
        }
    }

    /// The JSON specification passed to the encoder
    pub fn spec(&self, output_root: &std::path::Path) -> Vec<BoardEntry> {
        vec![BoardEntry {
            data: output_root
                .join(&self.boards_dir)
                .join(&self.board_file)
                .display()
                .to_string(),
            names: vec![self.board_name.clone()],
        }]
    }
}

impl Patch for BoardRepack {
    fn name(&self) -> &str {
        "ath10k/board-2.bin"
    }

    fn prerequisites(&self) -> Vec<PathBuf> {
        vec![self.boards_dir.join(&self.board_file)]
    }

    fn apply(&self, ctx: &ExecutionContext, log: &Logger) -> Result<()> {
        // The board description lives in the temp directory, so paths must be absolute
        let root = dunce::canonicalize(&ctx.output_root)
            .map_err(|e| step_failed("resolve", &ctx.output_root, &e))?;
        let boards = root.join(&self.boards_dir);
        let output = root.join(&self.output);

        let mut spec_file = tempfile::Builder::new()
            .prefix("fwgather-board-")
            .suffix(".json")
            .tempfile()?;
        serde_json::to_writer(spec_file.as_file_mut(), &self.spec(&root))?;
        spec_file.as_file_mut().flush()?;

        log.info(format!("encoding '{}' as '{}'", self.board_file, self.board_name));
        self.encoder.run(
            [
                OsStr::new("-c"),
                spec_file.path().as_os_str(),
                OsStr::new("-o"),
                output.as_os_str(),
            ],
            log,
        )?;

        if !output.is_file() {
            return Err(FwError::PatchStepFailed {
                message: format!("encoder did not produce '{}'", output.display()),
            });
        }

        log.info(format!("removing '{}'", boards.display()));
        std::fs::remove_dir_all(&boards).map_err(|e| step_failed("remove", &boards, &e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn patch(encoder: ExternalTool) -> BoardRepack {
        BoardRepack::new(
            "ath10k/WCN3990/hw1.0/boards",
            "bdwlan.b58",
            "bus=snoc,qmi-board-id=ff,qmi-chip-id=30224",
            "ath10k/WCN3990/hw1.0/board-2.bin",
            encoder,
        )
    }

    #[test]
    fn test_spec_json_shape() {
        let spec = patch(ExternalTool::new("enc")).spec(Path::new("/out"));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "data": "/out/ath10k/WCN3990/hw1.0/boards/bdwlan.b58",
                "names": ["bus=snoc,qmi-board-id=ff,qmi-chip-id=30224"],
            }])
        );
    }

    #[test]
    fn test_prerequisite_is_board_file() {
        assert_eq!(
            patch(ExternalTool::new("enc")).prerequisites(),
            vec![PathBuf::from("ath10k/WCN3990/hw1.0/boards/bdwlan.b58")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_encodes_and_removes_boards() {
        use crate::tool::write_script;
        use std::fs;
        use tempfile::TempDir;

        let tools = TempDir::new().unwrap();
        // Fake encoder: copies the JSON spec ($2) to the output ($4)
        let encoder = write_script(tools.path(), "ath10k-bdencoder", "cp \"$2\" \"$4\"");

        let out = TempDir::new().unwrap();
        let boards = out.path().join("ath10k/WCN3990/hw1.0/boards");
        fs::create_dir_all(&boards).unwrap();
        fs::write(boards.join("bdwlan.b58"), b"bdf").unwrap();
        fs::write(boards.join("bdwlan.b5f"), b"other").unwrap();

        let ctx = ExecutionContext::new(out.path(), out.path());
        patch(ExternalTool::new(encoder))
            .apply(&ctx, &Logger::new(true))
            .unwrap();

        let board2 = out.path().join("ath10k/WCN3990/hw1.0/board-2.bin");
        let written: serde_json::Value =
            serde_json::from_slice(&fs::read(&board2).unwrap()).unwrap();
        assert_eq!(
            written[0]["names"][0],
            "bus=snoc,qmi-board-id=ff,qmi-chip-id=30224"
        );
        assert!(
            written[0]["data"]
                .as_str()
                .unwrap()
                .ends_with("boards/bdwlan.b58")
        );
        assert!(!boards.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_encoder_failure_keeps_boards() {
        use crate::tool::write_script;
        use std::fs;
        use tempfile::TempDir;

        let tools = TempDir::new().unwrap();
        let encoder = write_script(tools.path(), "ath10k-bdencoder", "exit 2");

        let out = TempDir::new().unwrap();
        let boards = out.path().join("ath10k/WCN3990/hw1.0/boards");
        fs::create_dir_all(&boards).unwrap();
        fs::write(boards.join("bdwlan.b58"), b"bdf").unwrap();

        let ctx = ExecutionContext::new(out.path(), out.path());
        let err = patch(ExternalTool::new(encoder))
            .apply(&ctx, &Logger::new(true))
            .unwrap_err();

        assert!(matches!(err, FwError::ExternalToolFailed { .. }));
        assert!(boards.join("bdwlan.b58").exists());
    }
}
