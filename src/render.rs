use std::fmt::{Display, Write};

use crate::{
    posts::{CaptionedLink, Post, PostGroup},
    toolkits::Toolkit,
};

/// Writes text with every line after the first indented by `.1` spaces.
pub struct Indented<'a>(pub &'a str, pub usize);

pub struct ToolkitLine<'a>(pub &'a Toolkit);

pub struct GroupListing<'a>(pub &'a PostGroup);

pub struct PostLines<'a>(pub &'a Post);

impl<'a> Display for Indented<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.0.trim_end().chars() {
            match c {
                '\n' => {
                    f.write_char('\n')?;
                    write!(f, "{:width$}", "", width = self.1)?;
                }
                '\r' => {}
                _ => f.write_char(c)?,
            }
        }

        Ok(())
    }
}

impl<'a> Display for ToolkitLine<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Toolkit { name, id, status } = self.0;
        write!(f, "[{status}] {name} ({id})")
    }
}

impl<'a> Display for GroupListing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let group = self.0;
        let id = if group.group_id.is_empty() {
            "<no group>"
        } else {
            &group.group_id
        };
        let count = group.posts.len();
        let noun = if count == 1 { "post" } else { "posts" };
        writeln!(f, "group {id} ({count} {noun})")?;

        for post in &group.posts {
            write!(f, "{}", PostLines(post))?;
        }

        Ok(())
    }
}

impl<'a> Display for PostLines<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let post = self.0;
        let networks: Vec<&str> = post.social_networks().collect();
        let networks = if networks.is_empty() {
            "-".to_owned()
        } else {
            networks.join(",")
        };
        let ai = if post.ai_generated() { " ai" } else { "" };
        let status = post.status().unwrap_or("-");
        let prefix = format!("  - [{status}{ai}] {networks}: ");
        let text = post.text().unwrap_or_default();

        writeln!(f, "{prefix}{}", Indented(text, prefix.chars().count()))?;

        if let Some(CaptionedLink { caption, link }) = post.captioned_link() {
            writeln!(
                f,
                "      link: {} <{}>",
                caption.unwrap_or_default(),
                link.unwrap_or_default()
            )?;
        }
        for preview in post.media_previews() {
            writeln!(f, "      media: {preview}")?;
        }

        Ok(())
    }
}
