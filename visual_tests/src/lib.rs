mod compare;
mod scenario;

pub use compare::{
    compare_images, count_differing_pixels, generate_diff_image, load_reference, CompareResult,
    PIXEL_TOLERANCE,
};
pub use scenario::{Scenario, BACKGROUND, HEIGHT, WIDTH};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Reference image not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    pub scenario: Scenario,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
}

impl VisualTestConfig {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            similarity_threshold: 0.99,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Path to the rendered frame
    pub captured_path: PathBuf,
    /// Path to the reference image
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

/// Get the path to the references directory
pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

/// Get the path to a reference image for a scenario
pub fn reference_path(scenario: Scenario) -> PathBuf {
    references_dir().join(format!("{}.png", scenario.name()))
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

/// Get the path to a rendered frame
pub fn captured_path(scenario: Scenario) -> PathBuf {
    output_dir().join(format!("{}_captured.png", scenario.name()))
}

/// Get the path to a diff image
pub fn diff_path(scenario: Scenario) -> PathBuf {
    output_dir().join(format!("{}_diff.png", scenario.name()))
}

/// Render a scenario and compare it with its reference.
///
/// References are recorded with `UPDATE_REFERENCES=1`; a missing one is an
/// error.
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    run_against_reference(config, reference_path(config.scenario))
}

/// Render a scenario and compare it with the image at `ref_path`
pub fn run_against_reference(
    config: &VisualTestConfig,
    ref_path: PathBuf,
) -> Result<VisualTestResult> {
    if !ref_path.exists() {
        return Err(VisualTestError::ReferenceNotFound(ref_path));
    }

    std::fs::create_dir_all(output_dir())?;
    let cap_path = captured_path(config.scenario);

    let captured = config.scenario.render();
    captured.save(&cap_path)?;

    let reference = load_reference(&ref_path)?;
    let compare_result = compare_images(&reference, &captured)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    let diff = if !passed {
        let diff_file = diff_path(config.scenario);
        generate_diff_image(&reference, &captured, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Overwrite the reference image for a scenario
pub fn update_reference(scenario: Scenario) -> Result<PathBuf> {
    std::fs::create_dir_all(references_dir())?;

    let ref_path = reference_path(scenario);
    scenario.render().save(&ref_path)?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
