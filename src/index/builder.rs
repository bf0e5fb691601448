use std::sync::Arc;
use crate::analysis::normalizer::{normalize_latin, normalize_local};
use crate::core::types::{Dataset, Domain, Term, Word};
use crate::index::entry::{PayloadRef, SearchEntry, SearchIndex, SearchItem};

/// Projects a dataset into a `SearchIndex`. Pure: equal datasets give equal indexes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchIndexBuilder;

impl SearchIndexBuilder {
    pub fn new() -> Self {
        SearchIndexBuilder
    }

    pub fn build(&self, dataset: &Dataset) -> SearchIndex {
        let mut index = SearchIndex {
            items: Vec::with_capacity(dataset.len()),
            entries: Vec::with_capacity(dataset.len()),
        };

        for (i, term) in dataset.terms.iter().enumerate() {
            push(&mut index, term_item(term, i), &term_local_text(term), term.abbr.as_deref().unwrap_or_default());
        }
        for (i, word) in dataset.words.iter().enumerate() {
            push(&mut index, word_item(word, i), &word_local_text(word), &word_latin_text(word));
        }
        for (i, domain) in dataset.domains.iter().enumerate() {
            push(&mut index, domain_item(domain, i), &domain.name, domain.data_type.as_deref().unwrap_or_default());
        }

        index
    }
}

fn push(index: &mut SearchIndex, item: SearchItem, local: &str, latin: &str) {
    let item = Arc::new(item);
    index.items.push(item.clone());
    index.entries.push(SearchEntry {
        local_text: normalize_local(local),
        latin_text: normalize_latin(latin),
        item,
    });
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn join_present<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts.into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join(" ")
}

fn term_local_text(term: &Term) -> String {
    let head = [Some(term.ko_name.as_str()), term.description.as_deref(), term.domain_name.as_deref()];
    join_present(head.into_iter().chain(term.synonyms.iter().map(|s| Some(s.as_str()))))
}

fn word_local_text(word: &Word) -> String {
    let head = [Some(word.ko_name.as_str()), word.description.as_deref()];
    join_present(head.into_iter().chain(word.synonyms.iter().map(|s| Some(s.as_str()))))
}

fn word_latin_text(word: &Word) -> String {
    join_present([word.en_name.as_deref(), word.abbr.as_deref()])
}

fn term_item(term: &Term, index: usize) -> SearchItem {
    let sub_text = match non_blank(term.domain_name.as_deref()) {
        Some(domain) => Some(format!("Domain: {domain}")),
        None => non_blank(term.description.as_deref()).map(str::to_string),
    };
    SearchItem {
        title: term.ko_name.clone(),
        primary_en: term.abbr.clone(),
        abbr: term.abbr.clone(),
        sub_text,
        score: 0.0,
        payload: PayloadRef::Term(index),
        catalog_version: 0,
    }
}

fn word_item(word: &Word, index: usize) -> SearchItem {
    SearchItem {
        title: word.ko_name.clone(),
        primary_en: word.en_name.clone(),
        abbr: word.abbr.clone(),
        sub_text: non_blank(word.description.as_deref()).map(str::to_string),
        score: 0.0,
        payload: PayloadRef::Word(index),
        catalog_version: 0,
    }
}

/// `DATATYPE (length[,scale])`, either half omitted when absent.
pub fn domain_type_label(domain: &Domain) -> Option<String> {
    let size = domain.length.map(|length| match domain.scale {
        Some(scale) => format!("({length},{scale})"),
        None => format!("({length})"),
    });
    let label = join_present([domain.data_type.as_deref(), size.as_deref()]);
    (!label.is_empty()).then_some(label)
}

fn domain_item(domain: &Domain, index: usize) -> SearchItem {
    SearchItem {
        title: domain.name.clone(),
        primary_en: domain.data_type.clone(),
        abbr: None,
        sub_text: domain_type_label(domain),
        score: 0.0,
        payload: PayloadRef::Domain(index),
        catalog_version: 0,
    }
}
