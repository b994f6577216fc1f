//! List command - prints the ideas stored in a data directory.

use ideaboard::Store;

use crate::cli::ListArgs;
use crate::output::print_table;

/// Run the `list` command
///
/// Unlike the server, this reports an unreadable document instead of
/// treating it as empty.
pub async fn run(args: &ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::in_dir(&args.store.data_dir);
    let collection = store.try_load().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&collection.ideas)?);
        return Ok(());
    }

    if collection.is_empty() {
        println!("No ideas found in {}.", store.path().display());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = collection
        .iter()
        .map(|idea| {
            vec![
                idea.id.clone(),
                idea.likes.to_string(),
                format!("{} ({})", idea.author, idea.profession),
                idea.audience.clone(),
                idea.title.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "LIKES", "AUTHOR", "AUDIENCE", "TITLE"], &rows);

    Ok(())
}
