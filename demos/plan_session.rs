//! Plan a few recording sessions against a growing history.
//!
//! Each session draws five words weighted by how far they are from the
//! per-word target, records one clip per word, and prints the export names.
//! Words that have caught up stop appearing until the rest catch up too.

use signdraw::format::clip_display_name;
use signdraw::{FixedSeeds, RecordingHistory, SessionConfig, SessionPlanner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = [
        "apple", "bird", "cat", "dog", "eat", "father", "go", "happy", "ice", "jump",
    ];

    let config = SessionConfig {
        target_recordings: 2,
        ..SessionConfig::default()
    };
    let mut planner = SessionPlanner::with_seeds(config, FixedSeeds::new([11, 23, 37, 41, 53]));
    let mut history = RecordingHistory::new();

    for session in 1..=5 {
        let words = planner.plan(&catalog, &history)?;
        println!("session {session}: {words:?}");

        let clips: Vec<(&str, usize)> = words.iter().map(|&w| (w, 1)).collect();
        for clip in history.record_session(&clips) {
            println!(
                "  {}",
                clip_display_name("P01", clip.id, &clip.word, "take.mp4")
            );
        }
    }

    println!();
    for (key, value) in history.preference_entries() {
        println!("{key} = {value}");
    }

    Ok(())
}
