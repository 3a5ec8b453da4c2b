//! Community feed commands: list, create, comment, like.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use safehaven_types::post::{Comment, Post};

use super::{format_relative_time, truncate};
use crate::state::AppState;

/// Show the feed in a table.
pub async fn list_posts(state: &AppState, json: bool) -> Result<()> {
    let posts = state.store.list_posts().await?;
    print_posts(&posts, json)
}

pub async fn create_post(state: &AppState, author: &str, content: &str, json: bool) -> Result<()> {
    let post = Post::new(author, content);
    let id = post.id.clone();
    let posts = state.store.create_post(post).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }
    println!();
    println!(
        "  {} Post published ({})",
        style("✓").green().bold(),
        style(id).dim()
    );
    println!();
    Ok(())
}

pub async fn add_comment(
    state: &AppState,
    post_id: &str,
    author: &str,
    content: &str,
    json: bool,
) -> Result<()> {
    let posts = state
        .store
        .add_comment(post_id, Comment::new(author, content))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }
    match posts.iter().find(|p| p.id == post_id) {
        Some(post) => println!(
            "\n  {} Comment added ({} on this post)\n",
            style("✓").green().bold(),
            post.comments.len()
        ),
        None => println!(
            "\n  {} No post with id {}\n",
            style("!").yellow().bold(),
            style(post_id).yellow()
        ),
    }
    Ok(())
}

pub async fn like_post(state: &AppState, post_id: &str, json: bool) -> Result<()> {
    let posts = state.store.toggle_like(post_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }
    match posts.iter().find(|p| p.id == post_id) {
        Some(post) => println!(
            "\n  {} {} likes\n",
            style("♥").red().bold(),
            style(post.likes).bold()
        ),
        None => println!(
            "\n  {} No post with id {}\n",
            style("!").yellow().bold(),
            style(post_id).yellow()
        ),
    }
    Ok(())
}

fn print_posts(posts: &[Post], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!();
        println!(
            "  {} The feed is empty. Share something with: {}",
            style("i").blue().bold(),
            style("haven posts create \"...\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Author").fg(Color::White),
        Cell::new("Post").fg(Color::White),
        Cell::new("Likes").fg(Color::White),
        Cell::new("Comments").fg(Color::White),
        Cell::new("Posted").fg(Color::White),
    ]);

    for post in posts {
        table.add_row(vec![
            Cell::new(truncate(&post.id, 12)).fg(Color::DarkGrey),
            Cell::new(&post.author).fg(Color::Cyan),
            Cell::new(truncate(&post.content, 60)),
            Cell::new(post.likes).fg(Color::Red),
            Cell::new(post.comments.len()),
            Cell::new(format_relative_time(&post.timestamp)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}
