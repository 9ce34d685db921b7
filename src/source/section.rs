//! Block extraction from raw snapshot text.
//!
//! Both snapshot formats wrap each object in a block:
//!
//! ```text
//! servicestatus {
//! 	host_name=web01
//! 	service_description=HTTP
//! 	}
//! ```
//!
//! A block opens with a `<keyword> {` line and closes at the first line that is
//! exactly a tab followed by `}`.

use crate::error::{Error, Result};

const TERMINATOR: &str = "\t}";

/// Extract the raw bodies of every `keyword` block, in file order.
///
/// Bodies are returned verbatim (everything between the opening and closing
/// lines). A file without the block yields an empty vector; a block that is
/// never closed is an error.
pub fn extract_sections<'a>(text: &'a str, keyword: &str) -> Result<Vec<&'a str>> {
    let opener = format!("{} {{", keyword);
    let mut sections = Vec::new();
    // (byte offset where the body starts, 1-based line of the opener)
    let mut open: Option<(usize, usize)> = None;
    let mut offset = 0;

    for (index, line) in text.split_inclusive('\n').enumerate() {
        let content = line.trim_end_matches(['\n', '\r']);
        match open {
            None if content.trim() == opener => {
                open = Some((offset + line.len(), index + 1));
            }
            Some((start, _)) if content == TERMINATOR => {
                sections.push(&text[start..offset]);
                open = None;
            }
            _ => {}
        }
        offset += line.len();
    }

    match open {
        Some((_, line)) => Err(Error::UnterminatedBlock {
            keyword: keyword.to_string(),
            line,
        }),
        None => Ok(sections),
    }
}
