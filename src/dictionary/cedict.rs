//! CC-CEDICT loader / CC-CEDICT 词典解析
//!
//! Line format: `traditional simplified [pinyin] /gloss1/gloss2/.../`
//! - Lines starting with `#` are comments / 注释行
//! - A surname entry directly followed by another entry with the same
//!   traditional form is dropped / 去除被后续条目覆盖的姓氏条目
//! - Entries are keyed by simplified form, later entries win / 以简体为键

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Dictionary;
use crate::error::{FlashcardError, FlashcardResult};

static LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+(\S+)\s+\[([^\]]*)\]\s*/(.*)/\s*$").expect("valid CC-CEDICT line pattern")
});

/// One dictionary line / 词典条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub traditional: String,
    pub simplified: String,
    pub pinyin: String,
    pub glosses: Vec<String>,
}

impl DictionaryEntry {
    /// All glosses joined into one card definition / 合并释义
    pub fn definition(&self) -> String {
        self.glosses.join("; ")
    }

    fn is_surname(&self) -> bool {
        self.glosses
            .first()
            .map(|g| g.contains("surname "))
            .unwrap_or(false)
    }
}

/// Parse a single line, `None` for comments and malformed lines / 解析单行
pub fn parse_line(line: &str) -> Option<DictionaryEntry> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let caps = LINE.captures(line)?;
    let glosses: Vec<String> = caps[4]
        .split('/')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();
    if glosses.is_empty() {
        return None;
    }

    Some(DictionaryEntry {
        traditional: caps[1].to_string(),
        simplified: caps[2].to_string(),
        pinyin: caps[3].trim().to_string(),
        glosses,
    })
}

fn remove_surnames(entries: &mut Vec<DictionaryEntry>) {
    if entries.len() < 2 {
        return;
    }
    for i in (0..entries.len() - 1).rev() {
        if entries[i].is_surname() && entries[i].traditional == entries[i + 1].traditional {
            entries.remove(i);
        }
    }
}

/// In-memory CC-CEDICT dictionary / 内存词典
#[derive(Debug, Default, Clone)]
pub struct CedictDictionary {
    entries: HashMap<String, DictionaryEntry>,
}

impl CedictDictionary {
    /// Parse dictionary lines from a reader / 从读取器解析
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut list = Vec::new();
        for line in reader.lines() {
            if let Some(entry) = parse_line(&line?) {
                list.push(entry);
            }
        }

        remove_surnames(&mut list);

        let entries = list
            .into_iter()
            .map(|entry| (entry.simplified.clone(), entry))
            .collect();
        Ok(Self { entries })
    }

    /// Load a CC-CEDICT file / 加载词典文件
    pub fn load(path: impl AsRef<Path>) -> FlashcardResult<Self> {
        let path = path.as_ref();
        tracing::info!("Parsing dictionary {:?}", path);

        let dictionary = File::open(path)
            .and_then(|file| Self::from_reader(BufReader::new(file)))
            .map_err(|source| FlashcardError::Dictionary {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!("Loaded {} dictionary entries", dictionary.len());
        Ok(dictionary)
    }

    pub fn get(&self, simplified: &str) -> Option<&DictionaryEntry> {
        self.entries.get(simplified)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dictionary for CedictDictionary {
    fn definition(&self, term: &str) -> Option<String> {
        self.get(term).map(DictionaryEntry::definition)
    }
}
