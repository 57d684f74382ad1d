//! List manifest content

use anyhow::Result;
use std::collections::HashMap;

use super::index::read_manifest;
use crate::content::PostRecord;
use crate::Site;

/// List manifest content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let posts = read_manifest(&site.manifest_path)?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!("  {} - {} [{}]", post.date, post.title, post.url);
            }
        }
        "tag" | "tags" => {
            let tags = count_by(&posts, |post| post.tags.clone());
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = count_by(&posts, |post| post.category.iter().cloned().collect());
            println!("Categories ({}):", categories.len());
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Count posts per key, most used first
fn count_by<F>(posts: &[PostRecord], keys: F) -> Vec<(String, usize)>
where
    F: Fn(&PostRecord) -> Vec<String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for key in keys(post) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
