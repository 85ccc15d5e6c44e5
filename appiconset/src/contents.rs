use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;

/// Device family an icon slot belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Idiom {
    Iphone,
    Ipad,
    IosMarketing,
}

/// `Contents.json` of an `.appiconset`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentsJson {
    pub images: Vec<ImageEntry>,
    pub info: Info,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    pub idiom: Idiom,
    /// Scale factor, `1x`, `2x` or `3x`.
    pub scale: String,
    /// Size in points, `{w}x{h}`.
    pub size: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub author: String,
    pub version: u32,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            author: "xcode".into(),
            version: 1,
        }
    }
}

impl ContentsJson {
    /// Serializes in the layout Xcode itself writes: two space indent and a
    /// space on both sides of the colon.
    pub fn to_xcode_string(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, XcodeFormatter::new());
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        // serde_json only emits valid utf-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

struct XcodeFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl XcodeFormatter<'_> {
    fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for XcodeFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.begin_array(w)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.end_array(w)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, w: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_array_value(w, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(w)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.begin_object(w)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.end_object(w)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, w: &mut W, first: bool) -> io::Result<()> {
        self.pretty.begin_object_key(w, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, w: &mut W) -> io::Result<()> {
        w.write_all(b" : ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(w)
    }
}
