use botflow::prelude::*;

/// Walks the canned sample flow end to end: lays it out, prints the grid,
/// then replays the conversation with scripted answers.
fn main() {
    let blocks = sample_flow();

    println!("Laying out {} blocks...", blocks.len());
    let placed = compute_layout(&blocks, &LayoutOptions::default());
    for block in &placed {
        println!(
            "  -> {:<22} [{}] at ({:.0}, {:.0})",
            block.id, block.kind, block.position.x, block.position.y
        );
    }

    let levels = assign_levels(&blocks);
    for level in levels.levels() {
        let group = levels.group(level);
        if group.len() > 1 {
            println!("Branch at level {}: {:?}", level, group);
        }
    }

    println!("\nStarting preview...");
    let mut session = PreviewSession::new(blocks);
    let generation = session.start();

    let answers = ["Ana Garcia", "ana@example.com", "$250k - $400k", "Apartment"];
    let mut next_answer = answers.iter();

    loop {
        match session.run_to_suspension(generation) {
            StepOutcome::AwaitingInput => {
                let Some(answer) = next_answer.next() else {
                    eprintln!("Preview asked more questions than scripted answers.");
                    std::process::exit(1);
                };
                session.submit_answer(generation, answer);
            }
            StepOutcome::Complete => break,
            outcome => {
                eprintln!("Preview stopped unexpectedly: {:?}", outcome);
                std::process::exit(1);
            }
        }
    }

    println!("\nTranscript:");
    for entry in session.transcript() {
        let speaker = match entry.role {
            Role::Bot => "bot ",
            Role::User => "user",
        };
        println!("  [{}] {}", speaker, entry.content);
    }

    println!("\nCollected variables:");
    for (name, value) in session.variables() {
        println!("  {} = {}", name, value);
    }
}
