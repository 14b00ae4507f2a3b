//! Thin SVG element layer over `quick_xml::Writer`.
//!
//! Elements with children are written through closures so every start tag
//! is paired with its end tag even when a child fails half way.

use std::fmt;
use std::io::Write;
use std::ops::Add;

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::RenderResult;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Side length of a day cell.
pub const CELL_SIZE: i32 = 10;

/// Corner radius of a day cell.
pub const CELL_RADIUS: i32 = 2;

pub const FONT_SIZE: &str = "12px";

/// Integer canvas coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start tag under construction.
#[derive(Debug, Clone)]
pub struct Element {
    name: &'static str,
    start: BytesStart<'static>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: BytesStart::new(name),
        }
    }

    pub fn attr(mut self, key: &str, value: impl fmt::Display) -> Self {
        let value = value.to_string();
        self.start.push_attribute((key, value.as_str()));
        self
    }

    /// Adds a `class` attribute; a no-op for an empty class list.
    pub fn class(self, classes: &[&str]) -> Self {
        if classes.is_empty() {
            return self;
        }
        self.attr("class", classes.join(" "))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Day-cell sized rounded square at `location`; callers append fill and
/// class attributes.
pub fn rounded_rect(location: Point) -> Element {
    Element::new("rect")
        .attr("x", location.x)
        .attr("y", location.y)
        .attr("width", CELL_SIZE)
        .attr("height", CELL_SIZE)
        .attr("rx", CELL_RADIUS)
}

/// Streams SVG elements into any `Write` sink.
pub struct SvgWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> SvgWriter<W> {
    /// Compact output without any whitespace between elements.
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
        }
    }

    /// Output indented by two spaces per level.
    pub fn new_indented(inner: W) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, b' ', 2),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Writes `element` with the children produced by `content`.
    pub fn non_empty<F>(&mut self, element: Element, content: F) -> RenderResult<()>
    where
        F: FnOnce(&mut Self) -> RenderResult<()>,
    {
        let name = element.name;
        self.writer.write_event(Event::Start(element.start))?;
        content(self)?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes a self-closing element.
    pub fn empty(&mut self, element: Element) -> RenderResult<()> {
        self.writer.write_event(Event::Empty(element.start))?;
        Ok(())
    }

    /// Escaped character data.
    pub fn chars(&mut self, text: &str) -> RenderResult<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Group shifted by `offset`.
    pub fn translated<F>(&mut self, offset: Point, content: F) -> RenderResult<()>
    where
        F: FnOnce(&mut Self) -> RenderResult<()>,
    {
        let group = Element::new("g").attr(
            "transform",
            format_args!("translate({} {})", offset.x, offset.y),
        );
        self.non_empty(group, content)
    }

    pub fn text<F>(
        &mut self,
        location: Point,
        anchor: TextAnchor,
        classes: &[&str],
        content: F,
    ) -> RenderResult<()>
    where
        F: FnOnce(&mut Self) -> RenderResult<()>,
    {
        let element = Element::new("text")
            .attr("x", location.x)
            .attr("y", location.y)
            .attr("font-size", FONT_SIZE)
            .attr("text-anchor", anchor)
            .class(classes);
        self.non_empty(element, content)
    }

    pub fn simple_text(
        &mut self,
        location: Point,
        anchor: TextAnchor,
        classes: &[&str],
        content: &str,
    ) -> RenderResult<()> {
        self.text(location, anchor, classes, |w| w.chars(content))
    }

    /// Bold lead-in followed by plain text, all inside the current `text`.
    pub fn emphasized(&mut self, bold: &str, rest: &str) -> RenderResult<()> {
        let tspan = Element::new("tspan").attr("font-weight", "800");
        self.non_empty(tspan, |w| w.chars(bold))?;
        self.chars(rest)
    }

    /// Inline stylesheet wrapped in CDATA.
    pub fn style(&mut self, css: &str) -> RenderResult<()> {
        self.writer.write_event(Event::Start(BytesStart::new("style")))?;
        self.writer.write_event(Event::CData(BytesCData::new(css)))?;
        self.writer.write_event(Event::End(BytesEnd::new("style")))?;
        Ok(())
    }
}
