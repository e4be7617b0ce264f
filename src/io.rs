//! Reading baskets from text.
//!
//! One basket per line. Items are separated by commas and/or whitespace.
//! A line may start with `name:` to label its basket. Blank lines and lines
//! starting with `#` are skipped.

use std::io::BufRead;

use log::debug;

use crate::{
    basket::Basket,
    error::{AprioriError, Result},
};

pub fn read_baskets<R: BufRead>(reader: R) -> Result<Vec<Basket>> {
    let mut baskets = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(basket) = parse_line(&line, number + 1)? {
            baskets.push(basket);
        }
    }
    debug!("Read {} baskets", baskets.len());

    Ok(baskets)
}

fn parse_line(line: &str, number: usize) -> Result<Option<Basket>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    // a name is a single word before the first colon
    let (name, rest) = match line.split_once(':') {
        Some((name, rest)) if !name.trim().contains(is_separator) => (Some(name.trim()), rest),
        _ => (None, line),
    };

    let items: Vec<String> = rest
        .split(is_separator)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if name == Some("") {
        return Err(AprioriError::Parse {
            line: number,
            reason: "empty basket name".to_string(),
        });
    }
    if items.is_empty() {
        return Err(AprioriError::Parse {
            line: number,
            reason: "basket has no items".to_string(),
        });
    }

    match name {
        Some(name) => Ok(Some(Basket::named(items, name))),
        None => Ok(Some(Basket::new(items))),
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}
