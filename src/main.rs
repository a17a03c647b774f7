// Example runner for the `tile_shuffle` library: loads an image, shuffles
// its tiles, and optionally replays a move script over the shuffled grid.

use std::env;

use tile_shuffle::core_modules::utils::image_helper::image_helper;
use tile_shuffle::{MoveScript, MoveSimulator, PermutedGrid, Puzzle, PuzzleConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --- 1. Argument Parsing & Setup ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        println!("Usage: tile_shuffle <input_image> <div_x> <div_y> [move_script]");
        return Ok(());
    }
    let input_path = &args[1];
    let div_x: u32 = args[2].parse()?;
    let div_y: u32 = args[3].parse()?;

    // --- 2. Problem Setup ---
    let image = image_helper::load(input_path)?;
    let config = PuzzleConfig {
        div_x,
        div_y,
        select_cost: 10,
        change_cost: 10,
        max_select_times: 3,
    };
    let puzzle = Puzzle::new(image, &config)?;
    println!(
        "Loaded {}x{} image as a {}x{} tile grid",
        puzzle.grid().width(),
        puzzle.grid().height(),
        div_x,
        div_y
    );

    // --- 3. Shuffle & Render ---
    let shuffled = PermutedGrid::shuffled(puzzle.into_grid(), &mut rand::thread_rng());
    image_helper::save("shuffled.png", &shuffled.render())?;
    println!("Wrote shuffled.png");

    // --- 4. Optional Script Replay ---
    if let Some(script_path) = args.get(4) {
        let script = MoveScript::parse(&std::fs::read_to_string(script_path)?)?;
        let mut simulator = MoveSimulator::new(shuffled);
        script.apply(&mut simulator)?;

        image_helper::save("applied.png", &simulator.render())?;
        image_helper::save("highlighted.png", &simulator.render_highlighted())?;
        println!(
            "Applied {} script entries, cursor left at {:?}",
            script.entries.len(),
            simulator.cursor()
        );
    }

    Ok(())
}
