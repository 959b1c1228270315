//! # Tag Rewriter
//!
//! Walks the discussion blocks once, pulling tag-shaped list items out of the
//! tree and recording them in a [`TaggedComponents`].
//!
//! ## Eligibility
//!
//! Only items of an unordered list sitting directly in the discussion are
//! candidates. The walk carries its depth explicitly; anything reached below
//! depth zero (block quotes, list item bodies, directive bodies) is copied
//! through untouched. Entries of an outline such as `Parameters:` are read
//! through [`extract_outline`] while handling their parent, never on their own.
//!
//! ## Output
//!
//! A new block sequence with consumed items removed. Lists left without items
//! are dropped; the original tree is never modified.

use log::{debug, trace};

use crate::model::{HttpParameter, HttpResponse, Parameter, Return, SimpleTag, TaggedComponents, Throw};
use crate::tags::{ExtractedTag, KnownTagKind, extract_outline, extract_tag, is_simple_tag};
use crate::tree::{Block, Directive, LineIndex, List, ListItem, render_block};

/// The reduced discussion and every tag taken out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub blocks: Vec<Block>,
    pub components: TaggedComponents,
}

pub struct TagRewriter<'a> {
    line_index: &'a LineIndex,
}

impl<'a> TagRewriter<'a> {
    pub fn new(line_index: &'a LineIndex) -> Self {
        Self { line_index }
    }

    pub fn rewrite(&self, blocks: &[Block]) -> RewriteOutcome {
        let mut components = TaggedComponents::default();
        let blocks = self.rewrite_blocks(blocks, 0, &mut components);
        RewriteOutcome { blocks, components }
    }

    fn rewrite_blocks(
        &self,
        blocks: &[Block],
        depth: usize,
        components: &mut TaggedComponents,
    ) -> Vec<Block> {
        blocks
            .iter()
            .filter_map(|block| self.rewrite_block(block, depth, components))
            .collect()
    }

    fn rewrite_block(
        &self,
        block: &Block,
        depth: usize,
        components: &mut TaggedComponents,
    ) -> Option<Block> {
        match block {
            Block::List(list) if depth == 0 && !list.is_ordered() => {
                self.rewrite_tag_list(list, components)
            }
            Block::DoxygenParameter { name, children } if depth == 0 => {
                debug!("recording \\param {name}");
                components
                    .parameters
                    .push(Parameter::new(name.clone(), render_all(children), true));
                None
            }
            Block::DoxygenReturns { children } if depth == 0 => {
                debug!("recording \\returns");
                components.returns.push(Return::new(render_all(children)));
                None
            }
            Block::List(list) => Some(Block::List(List {
                start: list.start,
                items: list
                    .items
                    .iter()
                    .map(|item| self.copy_item(item, depth + 1, components))
                    .collect(),
            })),
            Block::BlockQuote(_) => Some(Block::BlockQuote(self.rewrite_blocks(
                block.children(),
                depth + 1,
                components,
            ))),
            Block::Directive(directive) => Some(Block::Directive(Directive {
                name: directive.name.clone(),
                arguments: directive.arguments.clone(),
                children: self.rewrite_blocks(block.children(), depth + 1, components),
            })),
            other => Some(other.clone()),
        }
    }

    fn copy_item(
        &self,
        item: &ListItem,
        depth: usize,
        components: &mut TaggedComponents,
    ) -> ListItem {
        ListItem {
            children: self.rewrite_blocks(&item.children, depth, components),
            span: item.span,
        }
    }

    fn rewrite_tag_list(&self, list: &List, components: &mut TaggedComponents) -> Option<Block> {
        let mut survivors = Vec::with_capacity(list.items.len());
        for item in &list.items {
            if !self.consume_item(item, components) {
                survivors.push(self.copy_item(item, 1, components));
            }
        }

        if survivors.is_empty() && !list.items.is_empty() {
            trace!("dropping list emptied by tag extraction");
            return None;
        }
        Some(Block::List(List {
            start: list.start,
            items: survivors,
        }))
    }

    /// Records `item` if it is a tag. Returns whether it was consumed.
    fn consume_item(&self, item: &ListItem, components: &mut TaggedComponents) -> bool {
        let Some(mut tag) = extract_tag(item, self.line_index) else {
            return false;
        };

        let Some(kind) = tag.kind.take() else {
            if is_simple_tag(&tag.raw_name) {
                debug!("recording simple tag {:?}", tag.raw_name);
                let contents = tag.rendered_contents();
                components.other_tags.push(SimpleTag::new(tag.raw_name, contents));
                return true;
            }
            trace!("{:?} is not a known tag, keeping it", tag.raw_name);
            return false;
        };

        debug!("recording {kind:?}");
        let contents = tag.rendered_contents();
        match kind {
            KnownTagKind::Returns => components.returns.push(Return::new(contents)),
            KnownTagKind::Throws => components.throws.push(Throw::new(contents)),
            KnownTagKind::Parameter(name) => components
                .parameters
                .push(Parameter::new(name, contents, true).with_name_range(tag.name_range)),
            KnownTagKind::ParametersOutline => {
                components
                    .parameters
                    .extend(self.outline(item).map(|entry| {
                        Parameter::new(entry.raw_name.clone(), entry.rendered_contents(), false)
                            .with_name_range(entry.name_range)
                    }))
            }
            KnownTagKind::HttpBody { media_type } => {
                components.set_http_body_contents(contents, media_type)
            }
            KnownTagKind::HttpResponse(code) => components
                .http_responses
                .push(HttpResponse::from_code(&code, contents)),
            KnownTagKind::HttpResponsesOutline => {
                components.http_responses.extend(self.outline(item).map(|entry| {
                    HttpResponse::from_code(&entry.raw_name, entry.rendered_contents())
                }))
            }
            KnownTagKind::HttpParameter(name) => components
                .http_parameters
                .push(HttpParameter::new(name, contents)),
            KnownTagKind::HttpParametersOutline => components
                .http_parameters
                .extend(self.outline(item).map(http_parameter)),
            KnownTagKind::HttpBodyParameter(name) => {
                components.push_http_body_parameter(HttpParameter::new(name, contents))
            }
            KnownTagKind::HttpBodyParametersOutline => components
                .http_body_mut()
                .parameters
                .extend(self.outline(item).map(http_parameter)),
        }
        true
    }

    fn outline(&self, item: &ListItem) -> impl Iterator<Item = ExtractedTag> {
        extract_outline(item, self.line_index).into_iter()
    }
}

fn http_parameter(entry: ExtractedTag) -> HttpParameter {
    let contents = entry.rendered_contents();
    HttpParameter::new(entry.raw_name, contents)
}

fn render_all(blocks: &[Block]) -> Vec<String> {
    blocks.iter().map(render_block).collect()
}
