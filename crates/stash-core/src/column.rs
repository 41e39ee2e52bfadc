//! Columns
//!
//! A column owns an ordered set of entries and everything needed to
//! show them: the visible/hidden partition, sort order, category
//! headers, pagination, and the highlight cursor. Selection policy
//! lives above in the selector; the column answers navigation and
//! layout queries.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Range;

use tracing::trace;
use unicode_width::UnicodeWidthStr;

use crate::cache::CellCache;
use crate::entry::{CollationGroup, CollationId, Entry};
use crate::filter::Filter;
use crate::item::{CategoryId, ItemCategory, ItemId, ItemPool, NOINVSYM};
use crate::preset::SelectorPreset;
use crate::render::{CellStyle, DisplayCell, DisplayRow, pad_to_width, trim_to_width};

/// What a column is for; drives layout priority and merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Carried inventory; the primary column.
    Gear,
    /// Worn and wielded items.
    Worn,
    /// Map and vehicle items around the character.
    Nearby,
    /// Read-only mirror of the current selection.
    Summary,
}

/// One visible line of the prepared column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Index into the column's entry list.
    Entry(usize),
    /// Category header pseudo-line.
    Header(CategoryId),
    /// Blank separator.
    Spacer,
}

/// Highlight movement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    /// First entry of the previous category.
    CategoryUp,
    /// First entry of the next category.
    CategoryDown,
}

/// Fixed prefix before the caption: invlet, space, marker, space.
const PREFIX_WIDTH: usize = 4;
/// Gap between cells.
const CELL_GAP: usize = 2;

#[derive(Debug)]
pub struct Column {
    role: ColumnRole,
    entries: Vec<Entry>,
    categories: BTreeMap<CategoryId, ItemCategory>,
    collations: Vec<CollationGroup>,
    /// Prepared visible sequence; rebuilt by `prepare_paging`.
    lines: Vec<Line>,
    /// Entry indices hidden by filter or collapse.
    hidden: Vec<usize>,
    /// Page boundaries as ranges into `lines`.
    pages: Vec<Range<usize>>,
    /// Index into `lines`; always an `Entry` line when set.
    highlight: Option<usize>,
    page_index: usize,
    height: usize,
    width: usize,
    /// Skip denied entries while navigating.
    skip_denied: bool,
    /// Read-only columns (selection summary) refuse activation.
    navigable: bool,
    /// Identity of the highlighted item, kept across re-sorts.
    remembered: Option<ItemId>,
    /// Per-cell max widths from the last layout pass: caption first.
    cell_widths: Vec<usize>,
}

impl Column {
    pub fn new(role: ColumnRole) -> Self {
        Column {
            role,
            entries: Vec::new(),
            categories: BTreeMap::new(),
            collations: Vec::new(),
            lines: Vec::new(),
            hidden: Vec::new(),
            pages: Vec::new(),
            highlight: None,
            page_index: 0,
            height: 2,
            width: 0,
            skip_denied: false,
            navigable: true,
            remembered: None,
            cell_widths: Vec::new(),
        }
    }

    pub fn role(&self) -> ColumnRole {
        self.role
    }

    /// A height of one line cannot hold an entry and its header, so
    /// pagination could never advance. Programming error.
    pub fn set_height(&mut self, height: usize) {
        assert!(height > 1, "column height must exceed 1, got {height}");
        self.height = height;
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn set_skip_denied(&mut self, skip: bool) {
        self.skip_denied = skip;
    }

    pub fn set_navigable(&mut self, navigable: bool) {
        self.navigable = navigable;
    }

    pub fn add_entry(&mut self, entry: Entry, category: ItemCategory) {
        if let Some(id) = entry.any_item() {
            debug_assert!(
                !self.entries.iter().any(|e| e.any_item() == Some(id)),
                "duplicate entry for {id:?}"
            );
        }
        self.categories.entry(category.id.clone()).or_insert(category);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.lines.clear();
        self.hidden.clear();
        self.pages.clear();
        self.collations.clear();
        self.highlight = None;
        self.page_index = 0;
    }

    /// Remove the entry holding `id`, if present. Paging is stale
    /// afterwards until the next prepare.
    pub fn remove_entry(&mut self, id: ItemId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.any_item() != Some(id));
        self.entries.len() != before
    }

    /// Drain entries and their categories into the caller, e.g. when
    /// this column is merged away during a reflow.
    pub fn drain(&mut self) -> (Vec<Entry>, Vec<ItemCategory>) {
        let entries = std::mem::take(&mut self.entries);
        let categories = std::mem::take(&mut self.categories).into_values().collect();
        self.clear();
        (entries, categories)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&ItemCategory> {
        self.categories.get(id)
    }

    pub fn register_category(&mut self, category: ItemCategory) {
        self.categories.insert(category.id.clone(), category);
    }

    pub fn collation(&self, id: CollationId) -> Option<&CollationGroup> {
        self.collations.iter().find(|g| g.id == id)
    }

    fn category_rank(&self, id: &CategoryId) -> i32 {
        self.categories.get(id).map_or(0, |c| c.rank)
    }

    fn compare_entries(
        &self,
        a: &Entry,
        b: &Entry,
        pool: &ItemPool,
        preset: &dyn SelectorPreset,
    ) -> Ordering {
        let rank_a = a.category.as_ref().map_or(0, |c| self.category_rank(c));
        let rank_b = b.category.as_ref().map_or(0, |c| self.category_rank(c));
        rank_a
            .cmp(&rank_b)
            .then_with(|| match (a.lead(pool), b.lead(pool)) {
                (Some(ia), Some(ib)) => preset
                    .compare(ia, ib)
                    // assigned quick-select letters sort first
                    .then_with(|| {
                        a.invlet(pool).is_none().cmp(&b.invlet(pool).is_none())
                    })
                    // favorites before the rest
                    .then_with(|| ib.is_favorite().cmp(&ia.is_favorite()))
                    .then_with(|| {
                        ia.name.to_lowercase().cmp(&ib.name.to_lowercase())
                    })
                    // collation headers lead their group
                    .then_with(|| {
                        b.collation_header.cmp(&a.collation_header)
                    }),
                _ => Ordering::Equal,
            })
            // generation guarantees a total order
            .then_with(|| a.generation.cmp(&b.generation))
    }

    /// Rebuild the visible/hidden partition, sort order, category
    /// headers and pages. Keeps the previously highlighted item when
    /// it survives the rebuild, otherwise falls back to the first
    /// selectable entry.
    pub fn prepare_paging(
        &mut self,
        filter: &Filter,
        pool: &ItemPool,
        preset: &dyn SelectorPreset,
        _cache: &mut CellCache,
    ) {
        self.hidden.clear();
        let mut visible: Vec<usize> = Vec::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            let shown = match entry.lead(pool) {
                Some(item) => {
                    preset.is_shown(item)
                        && filter.matches(item)
                        && !self.is_collapsed_child(entry)
                }
                // stale reference: the backing item vanished
                None => false,
            };
            if shown {
                visible.push(idx);
            } else {
                self.hidden.push(idx);
            }
        }

        visible.sort_by(|&a, &b| {
            self.compare_entries(&self.entries[a], &self.entries[b], pool, preset)
        });

        // Interleave category headers at group boundaries. Every
        // header is followed by at least one entry, so no two headers
        // are ever adjacent.
        self.lines.clear();
        let mut last_category: Option<CategoryId> = None;
        for idx in visible {
            let category = self.entries[idx].category.clone();
            if category != last_category {
                if let Some(cat) = &category {
                    self.lines.push(Line::Header(cat.clone()));
                }
                last_category = category;
            }
            self.lines.push(Line::Entry(idx));
        }

        self.rebuild_pages();
        self.restore_highlight();
        trace!(
            role = ?self.role,
            lines = self.lines.len(),
            hidden = self.hidden.len(),
            pages = self.pages.len(),
            "prepared paging"
        );
    }

    fn is_collapsed_child(&self, entry: &Entry) -> bool {
        if entry.collation_header {
            return false;
        }
        let Some(id) = entry.collation else {
            return false;
        };
        self.entries
            .iter()
            .any(|e| e.collation == Some(id) && e.collation_header && e.collapsed)
    }

    fn rebuild_pages(&mut self) {
        self.pages.clear();
        if self.lines.is_empty() {
            self.page_index = 0;
            return;
        }
        let page_size = self.height;
        let mut start = 0usize;
        while start < self.lines.len() {
            let mut end = (start + page_size).min(self.lines.len());
            // never leave a header dangling as the last line of a page
            if end < self.lines.len() {
                if let Line::Header(_) = self.lines[end - 1] {
                    end -= 1;
                }
            }
            debug_assert!(end > start, "page failed to advance");
            self.pages.push(start..end);
            start = end;
        }
        self.page_index = self.page_index.min(self.pages.len() - 1);
    }

    fn selectable_lines(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| match line {
                Line::Entry(idx) => {
                    let entry = &self.entries[*idx];
                    let ok = entry.is_selectable() && !(self.skip_denied && entry.is_denied());
                    ok.then_some(i)
                }
                _ => None,
            })
            .collect()
    }

    fn restore_highlight(&mut self) {
        let selectable = self.selectable_lines();
        if selectable.is_empty() {
            self.highlight = None;
            return;
        }
        let target = self.remembered.and_then(|id| {
            selectable.iter().copied().find(|&i| {
                matches!(self.lines[i], Line::Entry(idx)
                    if self.entries[idx].any_item() == Some(id))
            })
        });
        self.set_highlight(target.unwrap_or(selectable[0]));
    }

    fn set_highlight(&mut self, line: usize) {
        debug_assert!(
            matches!(self.lines.get(line), Some(Line::Entry(_))),
            "highlight must point at an entry line"
        );
        self.highlight = Some(line);
        if let Some(Line::Entry(idx)) = self.lines.get(line) {
            self.remembered = self.entries[*idx].any_item();
        }
        if let Some(page) = self.pages.iter().position(|p| p.contains(&line)) {
            self.page_index = page;
        }
    }

    pub fn highlight_line(&self) -> Option<usize> {
        self.highlight
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        match self.highlight.map(|i| &self.lines[i]) {
            Some(Line::Entry(idx)) => Some(*idx),
            _ => None,
        }
    }

    pub fn highlighted_entry(&self) -> Option<&Entry> {
        self.highlighted_index().map(|i| &self.entries[i])
    }

    pub fn highlighted_entry_mut(&mut self) -> Option<&mut Entry> {
        let idx = self.highlighted_index()?;
        Some(&mut self.entries[idx])
    }

    pub fn highlighted_item(&self) -> Option<ItemId> {
        self.highlighted_entry().and_then(|e| e.any_item())
    }

    /// Whether this column can receive keyboard navigation.
    pub fn is_activatable(&self) -> bool {
        self.navigable && !self.selectable_lines().is_empty()
    }

    /// Move the highlight. Wraps at both ends of the entry list.
    pub fn move_highlight(&mut self, scroll: Scroll) {
        let selectable = self.selectable_lines();
        if selectable.is_empty() {
            self.highlight = None;
            return;
        }
        let current = self
            .highlight
            .and_then(|h| selectable.iter().position(|&i| i == h));
        let next = match scroll {
            Scroll::Down => match current {
                Some(pos) => (pos + 1) % selectable.len(),
                None => 0,
            },
            Scroll::Up => match current {
                Some(pos) => (pos + selectable.len() - 1) % selectable.len(),
                None => selectable.len() - 1,
            },
            Scroll::Home => 0,
            Scroll::End => selectable.len() - 1,
            Scroll::PageDown => {
                let page = (self.page_index + 1).min(self.pages.len().saturating_sub(1));
                return self.highlight_page(page, &selectable);
            }
            Scroll::PageUp => {
                let page = self.page_index.saturating_sub(1);
                return self.highlight_page(page, &selectable);
            }
            Scroll::CategoryDown => {
                return self.highlight_category_step(1, &selectable);
            }
            Scroll::CategoryUp => {
                return self.highlight_category_step(-1, &selectable);
            }
        };
        self.set_highlight(selectable[next]);
    }

    fn highlight_page(&mut self, page: usize, selectable: &[usize]) {
        let Some(range) = self.pages.get(page).cloned() else {
            return;
        };
        self.page_index = page;
        if let Some(&line) = selectable.iter().find(|&&i| range.contains(&i)) {
            self.set_highlight(line);
        }
    }

    fn line_category(&self, line: usize) -> Option<&CategoryId> {
        match &self.lines[line] {
            Line::Entry(idx) => self.entries[*idx].category.as_ref(),
            Line::Header(cat) => Some(cat),
            Line::Spacer => None,
        }
    }

    /// Jump to the first selectable entry of the next (+1) or
    /// previous (-1) category, wrapping around.
    fn highlight_category_step(&mut self, dir: i32, selectable: &[usize]) {
        let Some(current_line) = self.highlight else {
            if let Some(&first) = selectable.first() {
                self.set_highlight(first);
            }
            return;
        };
        let current_cat = self.line_category(current_line).cloned();

        // ordered list of (category, first selectable line)
        let mut firsts: Vec<(Option<CategoryId>, usize)> = Vec::new();
        for &line in selectable {
            let cat = self.line_category(line).cloned();
            if firsts.last().map(|(c, _)| c) != Some(&cat) {
                firsts.push((cat, line));
            }
        }
        if firsts.is_empty() {
            return;
        }
        let pos = firsts
            .iter()
            .position(|(c, _)| *c == current_cat)
            .unwrap_or(0);
        let next = if dir > 0 {
            (pos + 1) % firsts.len()
        } else {
            (pos + firsts.len() - 1) % firsts.len()
        };
        let line = firsts[next].1;
        self.set_highlight(line);
    }

    /// Find the line of an entry by quick-select letter.
    pub fn line_by_invlet(&self, c: char, pool: &ItemPool) -> Option<usize> {
        self.lines.iter().position(|line| {
            matches!(line, Line::Entry(idx) if self.entries[*idx].invlet(pool) == Some(c))
        })
    }

    /// Highlight the entry bound to `c`, if present.
    pub fn select_by_invlet(&mut self, c: char, pool: &ItemPool) -> bool {
        match self.line_by_invlet(c, pool) {
            Some(line) => {
                self.set_highlight(line);
                true
            }
            None => false,
        }
    }

    /// Group adjacent visible entries sharing item type, category and
    /// favorite flag into collapsible collation groups. Idempotent:
    /// groups are rebuilt deterministically and collapsed state is
    /// carried over by group key.
    pub fn collate(&mut self, pool: &ItemPool, preset: &dyn SelectorPreset) {
        // remember collapse choices before rebuilding
        let mut collapsed: BTreeMap<(String, CategoryId, bool), bool> = BTreeMap::new();
        for entry in &self.entries {
            if entry.collation_header {
                if let (Some(item), Some(cat)) = (entry.lead(pool), entry.category.clone()) {
                    collapsed.insert((item.kind.clone(), cat, item.is_favorite()), entry.collapsed);
                }
            }
        }
        for entry in &mut self.entries {
            entry.collation = None;
            entry.collation_header = false;
        }
        self.collations.clear();

        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            self.compare_entries(&self.entries[a], &self.entries[b], pool, preset)
        });

        let mut next_id = 0u32;
        let mut run: Vec<usize> = Vec::new();
        let mut run_key: Option<(String, CategoryId, bool)> = None;
        let finish_run = |run: &mut Vec<usize>,
                          key: &Option<(String, CategoryId, bool)>,
                          entries: &mut [Entry],
                          collations: &mut Vec<CollationGroup>,
                          next_id: &mut u32| {
            if run.len() >= 2 {
                let key = key.clone().expect("non-empty run has a key");
                let id = CollationId(*next_id);
                *next_id += 1;
                collations.push(CollationGroup {
                    id,
                    kind: key.0.clone(),
                    category: key.1.clone(),
                    favorite: key.2,
                    size: run.len() as u32,
                });
                let was_collapsed = collapsed.get(&key).copied().unwrap_or(true);
                for (n, &idx) in run.iter().enumerate() {
                    entries[idx].collation = Some(id);
                    entries[idx].collation_header = n == 0;
                    entries[idx].collapsed = n == 0 && was_collapsed;
                }
            }
            run.clear();
        };

        for &idx in &order {
            let key = match (self.entries[idx].lead(pool), self.entries[idx].category.clone()) {
                (Some(item), Some(cat)) => Some((item.kind.clone(), cat, item.is_favorite())),
                _ => None,
            };
            if key.is_some() && key == run_key {
                run.push(idx);
            } else {
                finish_run(&mut run, &run_key, &mut self.entries, &mut self.collations, &mut next_id);
                run_key = key;
                run.push(idx);
            }
        }
        finish_run(&mut run, &run_key, &mut self.entries, &mut self.collations, &mut next_id);
    }

    /// Flip the collapsed state of the highlighted collation header.
    pub fn toggle_collapse(&mut self) -> bool {
        let Some(entry) = self.highlighted_entry_mut() else {
            return false;
        };
        if !entry.collation_header {
            return false;
        }
        entry.collapsed = !entry.collapsed;
        true
    }

    /// Entries with a nonzero chosen count. Iterates storage order:
    /// a chosen entry stays committed even when the current filter
    /// hides it.
    pub fn chosen_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_chosen())
    }

    pub fn clear_chosen(&mut self) {
        for entry in &mut self.entries {
            entry.set_chosen_count(0);
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn pages(&self) -> usize {
        self.pages.len()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Width this column would like: prefix + caption + cells + gaps.
    pub fn preferred_width(
        &mut self,
        pool: &ItemPool,
        preset: &dyn SelectorPreset,
        cache: &mut CellCache,
    ) -> usize {
        let cell_count = preset.cells().len();
        let mut widths = vec![0usize; cell_count + 1];
        for line in &self.lines {
            let Line::Entry(idx) = line else { continue };
            let entry = &self.entries[*idx];
            let Some(item) = entry.lead(pool) else { continue };
            let caption = cache.caption(item, entry.caption_count(item));
            let indent = entry.indent as usize * 2;
            widths[0] = widths[0].max(caption.width() + indent);
            for cell in 0..cell_count {
                let text = cache.cell(item, cell, preset);
                // stub cells do not count toward width
                if !text.is_empty() {
                    widths[cell + 1] = widths[cell + 1].max(text.width());
                }
            }
        }
        self.cell_widths = widths;
        let cells: usize = self.cell_widths.iter().sum();
        let gaps = CELL_GAP * self.cell_widths.iter().filter(|w| **w > 0).count();
        PREFIX_WIDTH + cells + gaps
    }

    /// Lay out the current page into display rows.
    pub fn layout(
        &self,
        pool: &ItemPool,
        preset: &dyn SelectorPreset,
        cache: &mut CellCache,
        category_nav: bool,
    ) -> Vec<DisplayRow> {
        let mut rows = Vec::new();
        let Some(range) = self.pages.get(self.page_index).cloned() else {
            return rows;
        };

        // repeat the category header when a page starts mid-category
        if let Some(Line::Entry(idx)) = self.lines.get(range.start) {
            if let Some(cat) = self.entries[*idx].category.as_ref() {
                rows.push(self.header_row(cat));
            }
        }

        for line in &self.lines[range] {
            match line {
                Line::Header(cat) => rows.push(self.header_row(cat)),
                Line::Spacer => rows.push(DisplayRow::new()),
                Line::Entry(idx) => rows.push(self.entry_row(
                    *idx,
                    pool,
                    preset,
                    cache,
                    category_nav,
                )),
            }
        }
        rows
    }

    fn header_row(&self, cat: &CategoryId) -> DisplayRow {
        let name = self
            .categories
            .get(cat)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| cat.0.clone());
        let mut row = DisplayRow::new();
        row.push(DisplayCell::new(name, CellStyle::Header));
        row
    }

    fn entry_row(
        &self,
        idx: usize,
        pool: &ItemPool,
        preset: &dyn SelectorPreset,
        cache: &mut CellCache,
        category_nav: bool,
    ) -> DisplayRow {
        let entry = &self.entries[idx];
        let highlighted = self.highlighted_index() == Some(idx);
        let style = if highlighted {
            if category_nav {
                CellStyle::HighlightCategory
            } else {
                CellStyle::Highlight
            }
        } else if entry.is_denied() {
            CellStyle::Denied
        } else if entry.is_chosen() {
            CellStyle::Selected
        } else {
            CellStyle::Normal
        };

        let mut row = DisplayRow::new();
        let invlet = entry.invlet(pool).unwrap_or(NOINVSYM);
        row.push(DisplayCell::new(
            format!("{invlet} {} ", entry.selection_marker()),
            style,
        ));

        let Some(item) = entry.lead(pool) else {
            return row;
        };
        let mut caption = String::new();
        for _ in 0..entry.indent {
            caption.push_str("  ");
        }
        if entry.collation_header {
            caption.push(if entry.collapsed { '▶' } else { '▼' });
            caption.push(' ');
        }
        caption.push_str(&cache.caption(item, entry.caption_count(item)));

        let caption_width = self.cell_widths.first().copied().unwrap_or(caption.width());
        let remaining = self.width.saturating_sub(PREFIX_WIDTH + caption_width);

        if let Some(denial) = &entry.denial {
            // denial text replaces the stat cells, right-aligned
            let trimmed = trim_to_width(denial, remaining.saturating_sub(CELL_GAP));
            row.push(DisplayCell::new(pad_to_width(&caption, caption_width), style));
            let pad = remaining.saturating_sub(trimmed.width());
            row.push(DisplayCell::new(
                format!("{}{}", " ".repeat(pad), trimmed),
                CellStyle::Denied,
            ));
            return row;
        }

        row.push(DisplayCell::new(pad_to_width(&caption, caption_width), style));
        for (cell, spec_width) in self.cell_widths.iter().enumerate().skip(1) {
            if *spec_width == 0 {
                continue;
            }
            let text = cache.cell(item, cell - 1, preset);
            let padded = format!("{:>width$}", text, width = spec_width + CELL_GAP);
            row.push(DisplayCell::new(padded, CellStyle::Dim));
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemFlags, ItemHandle};
    use crate::preset::DefaultPreset;

    fn handle(id: u32, name: &str, cat: (&str, &str, i32)) -> ItemHandle {
        ItemHandle {
            id: ItemId(id),
            kind: name.to_string(),
            name: name.to_string(),
            name_plural: None,
            category: ItemCategory::new(cat.0, cat.1, cat.2),
            count: 1,
            charges: None,
            weight_g: 100,
            volume_ml: 100,
            length_mm: 100,
            flags: ItemFlags::empty(),
            invlet: None,
            value: 10,
            capacity: None,
            parent: None,
        }
    }

    struct Fixture {
        pool: ItemPool,
        column: Column,
        cache: CellCache,
        preset: DefaultPreset,
        next_gen: u64,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                pool: ItemPool::new(),
                column: Column::new(ColumnRole::Gear),
                cache: CellCache::new(),
                preset: DefaultPreset::new(),
                next_gen: 0,
            }
        }

        fn add(&mut self, item: ItemHandle) {
            let generation = self.next_gen;
            self.next_gen += 1;
            let entry = Entry::new(vec![item.id], &item, generation);
            let category = item.category.clone();
            self.pool.insert(item);
            self.column.add_entry(entry, category);
        }

        fn prepare(&mut self) {
            self.column.prepare_paging(
                &Filter::default(),
                &self.pool,
                &self.preset,
                &mut self.cache,
            );
        }
    }

    fn food() -> (&'static str, &'static str, i32) {
        ("food", "FOOD", 5)
    }

    fn tools() -> (&'static str, &'static str, i32) {
        ("tools", "TOOLS", 10)
    }

    #[test]
    #[should_panic(expected = "height must exceed 1")]
    fn degenerate_height_is_rejected() {
        Column::new(ColumnRole::Gear).set_height(1);
    }

    #[test]
    fn headers_interleave_without_adjacency() {
        let mut fx = Fixture::new();
        fx.add(handle(1, "hammer", tools()));
        fx.add(handle(2, "beans", food()));
        fx.add(handle(3, "jerky", food()));
        fx.prepare();

        let lines = fx.column.lines();
        // FOOD header, 2 food entries, TOOLS header, 1 tool entry
        assert_eq!(lines.len(), 5);
        for pair in lines.windows(2) {
            assert!(
                !matches!(pair, [Line::Header(_), Line::Header(_)]),
                "adjacent headers: {pair:?}"
            );
        }
        // every entry belongs to the nearest preceding header
        let mut current: Option<CategoryId> = None;
        for line in lines {
            match line {
                Line::Header(cat) => current = Some(cat.clone()),
                Line::Entry(idx) => {
                    assert_eq!(fx.column.entries()[*idx].category, current);
                }
                Line::Spacer => {}
            }
        }
    }

    #[test]
    fn sort_is_total_and_stable_across_repeats() {
        let mut fx = Fixture::new();
        // same name and category: only generation breaks the tie
        fx.add(handle(1, "rag", tools()));
        fx.add(handle(2, "rag", tools()));
        fx.add(handle(3, "rag", tools()));
        fx.prepare();
        let first: Vec<Line> = fx.column.lines().to_vec();
        fx.prepare();
        assert_eq!(fx.column.lines(), &first[..]);

        let order: Vec<usize> = first
            .iter()
            .filter_map(|l| match l {
                Line::Entry(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn favorites_and_invlets_sort_first() {
        let mut fx = Fixture::new();
        fx.add(handle(1, "axe", tools()));
        let mut fav = handle(2, "axe", tools());
        fav.flags |= ItemFlags::FAVORITE;
        fx.add(fav);
        let mut lettered = handle(3, "axe", tools());
        lettered.invlet = Some('q');
        fx.add(lettered);
        fx.prepare();

        let order: Vec<ItemId> = fx
            .column
            .lines()
            .iter()
            .filter_map(|l| match l {
                Line::Entry(i) => fx.column.entries()[*i].any_item(),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![ItemId(3), ItemId(2), ItemId(1)]);
    }

    #[test]
    fn navigation_wraps_after_full_cycle() {
        let mut fx = Fixture::new();
        for i in 1..=4 {
            fx.add(handle(i, &format!("item{i}"), tools()));
        }
        fx.prepare();
        let start = fx.column.highlighted_item();
        for _ in 0..4 {
            fx.column.move_highlight(Scroll::Down);
        }
        assert_eq!(fx.column.highlighted_item(), start);
    }

    #[test]
    fn highlight_skips_headers() {
        let mut fx = Fixture::new();
        fx.add(handle(1, "hammer", tools()));
        fx.add(handle(2, "beans", food()));
        fx.prepare();
        // both moves land on entries, never headers
        fx.column.move_highlight(Scroll::Down);
        assert!(fx.column.highlighted_entry().is_some());
        fx.column.move_highlight(Scroll::Down);
        assert!(fx.column.highlighted_entry().is_some());
    }

    #[test]
    fn highlight_identity_survives_resort() {
        let mut fx = Fixture::new();
        fx.add(handle(1, "zucchini", food()));
        fx.add(handle(2, "apple", food()));
        fx.prepare();
        // move onto zucchini (sorted last)
        fx.column.move_highlight(Scroll::End);
        assert_eq!(fx.column.highlighted_item(), Some(ItemId(1)));
        // favorite the apple: resort happens, zucchini stays current
        fx.pool.get_mut(ItemId(2)).unwrap().flags |= ItemFlags::FAVORITE;
        fx.prepare();
        assert_eq!(fx.column.highlighted_item(), Some(ItemId(1)));
    }

    #[test]
    fn filter_hides_and_restores() {
        let mut fx = Fixture::new();
        fx.add(handle(1, "hammer", tools()));
        fx.add(handle(2, "beans", food()));
        let filter = Filter::new("bean");
        fx.column
            .prepare_paging(&filter, &fx.pool, &fx.preset, &mut fx.cache);
        let entries: Vec<usize> = fx
            .column
            .lines()
            .iter()
            .filter_map(|l| match l {
                Line::Entry(i) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(entries.len(), 1);
        fx.prepare();
        assert_eq!(
            fx.column
                .lines()
                .iter()
                .filter(|l| matches!(l, Line::Entry(_)))
                .count(),
            2
        );
    }

    #[test]
    fn collate_groups_identical_stacks_idempotently() {
        let mut fx = Fixture::new();
        for i in 1..=3 {
            fx.add(handle(i, "rag", tools()));
        }
        fx.add(handle(4, "hammer", tools()));
        fx.column.collate(&fx.pool, &fx.preset);
        fx.prepare();

        let headers: Vec<bool> = fx.column.entries().iter().map(|e| e.collation_header).collect();
        assert_eq!(headers.iter().filter(|h| **h).count(), 1);
        let first_groups: Vec<Option<CollationId>> =
            fx.column.entries().iter().map(|e| e.collation).collect();

        // collapsed header hides children: 1 rag header + hammer
        let visible_entries = fx
            .column
            .lines()
            .iter()
            .filter(|l| matches!(l, Line::Entry(_)))
            .count();
        assert_eq!(visible_entries, 2);

        fx.column.collate(&fx.pool, &fx.preset);
        fx.prepare();
        let second_groups: Vec<Option<CollationId>> =
            fx.column.entries().iter().map(|e| e.collation).collect();
        assert_eq!(first_groups, second_groups);
    }

    #[test]
    fn toggle_collapse_reveals_children() {
        let mut fx = Fixture::new();
        for i in 1..=3 {
            fx.add(handle(i, "rag", tools()));
        }
        fx.column.collate(&fx.pool, &fx.preset);
        fx.prepare();
        assert!(fx.column.toggle_collapse());
        fx.prepare();
        let visible_entries = fx
            .column
            .lines()
            .iter()
            .filter(|l| matches!(l, Line::Entry(_)))
            .count();
        assert_eq!(visible_entries, 3);
    }

    #[test]
    fn pagination_repeats_header_mid_category() {
        let mut fx = Fixture::new();
        for i in 1..=8 {
            fx.add(handle(i, &format!("ration {i:02}"), food()));
        }
        fx.column.set_height(4);
        fx.prepare();
        assert!(fx.column.pages() > 1);
        // jump to the second page; layout must start with a header
        fx.column.move_highlight(Scroll::PageDown);
        let rows = fx
            .column
            .layout(&fx.pool, &fx.preset, &mut fx.cache, false);
        assert_eq!(rows[0].cells[0].style, CellStyle::Header);
    }

    #[test]
    fn caption_shows_stack_count() {
        let mut fx = Fixture::new();
        let mut beans = handle(1, "canned beans", food());
        beans.count = 5;
        fx.add(beans);
        let mut lighter = handle(2, "lighter", tools());
        lighter.charges = Some(80);
        fx.add(lighter);
        fx.column.set_height(8);
        fx.prepare();
        fx.column
            .preferred_width(&fx.pool, &fx.preset, &mut fx.cache);

        let rows = fx
            .column
            .layout(&fx.pool, &fx.preset, &mut fx.cache, false);
        let text: Vec<String> = rows.iter().map(|r| r.plain_text()).collect();
        assert!(
            text.iter().any(|t| t.contains("canned beans x 5")),
            "stack caption missing its count: {text:?}"
        );
        assert!(
            text.iter().any(|t| t.contains("lighter (80)")),
            "charge caption missing its charges: {text:?}"
        );
    }

    #[test]
    fn invlet_lookup_highlights_entry() {
        let mut fx = Fixture::new();
        let mut axe = handle(1, "axe", tools());
        axe.invlet = Some('x');
        fx.add(axe);
        fx.add(handle(2, "saw", tools()));
        fx.prepare();
        assert!(fx.column.select_by_invlet('x', &fx.pool));
        assert_eq!(fx.column.highlighted_item(), Some(ItemId(1)));
        assert!(!fx.column.select_by_invlet('z', &fx.pool));
    }

    #[test]
    fn category_navigation_jumps_group_firsts() {
        let mut fx = Fixture::new();
        fx.add(handle(1, "beans", food()));
        fx.add(handle(2, "jerky", food()));
        fx.add(handle(3, "hammer", tools()));
        fx.add(handle(4, "saw", tools()));
        fx.prepare();
        // starts at first food entry; next category lands on hammer
        fx.column.move_highlight(Scroll::CategoryDown);
        assert_eq!(fx.column.highlighted_item(), Some(ItemId(3)));
        // wraps back around to food
        fx.column.move_highlight(Scroll::CategoryDown);
        assert_eq!(fx.column.highlighted_item(), Some(ItemId(1)));
    }

    #[test]
    fn stale_entries_hide_after_item_removal() {
        let mut fx = Fixture::new();
        fx.add(handle(1, "hammer", tools()));
        fx.add(handle(2, "saw", tools()));
        fx.prepare();
        fx.pool.remove(ItemId(1));
        fx.prepare();
        let entries = fx
            .column
            .lines()
            .iter()
            .filter(|l| matches!(l, Line::Entry(_)))
            .count();
        assert_eq!(entries, 1);
    }
}
