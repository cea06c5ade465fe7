//! Header, color table, and pixel data copy.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use enough::Stop;
use log::{debug, trace, warn};

use crate::error::BmpCopyError;
use crate::header::{BmpHeader, HEADER_LEN, Layout, PALETTE_LEN, Section};
use crate::limits::Limits;

/// How short reads are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Any section shorter than its declared size is a
    /// [`BmpCopyError::TruncatedInput`].
    #[default]
    Strict,

    /// Zero-fill whatever the input is missing and keep going. The output
    /// always has the size the header declares.
    Permissive,
}

/// What a successful copy did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub width: u32,
    pub height: u32,
    /// Bit depth as read from the header.
    pub bit_depth: i32,
    /// Whether a color table was copied.
    pub palette: bool,
    pub bytes_written: u64,
}

impl Summary {
    fn new(header: &BmpHeader, layout: &Layout) -> Self {
        Self {
            width: layout.width,
            height: layout.height,
            bit_depth: header.bit_depth(),
            palette: layout.palette_len != 0,
            bytes_written: layout.total_len as u64,
        }
    }
}

/// Copy request builder.
///
/// ```no_run
/// use bmpcopy::{CopyRequest, Limits, Unstoppable};
///
/// let limits = Limits {
///     max_payload_bytes: Some(64 << 20),
///     ..Default::default()
/// };
/// let summary = CopyRequest::new()
///     .with_limits(&limits)
///     .copy_file("in.bmp", "out.bmp", Unstoppable)?;
/// println!("{}x{}", summary.width, summary.height);
/// # Ok::<(), bmpcopy::BmpCopyError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CopyRequest<'a> {
    limits: Option<&'a Limits>,
    permissiveness: Permissiveness,
}

impl<'a> CopyRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Copy `input` to `output`.
    ///
    /// The input is opened before the output is created, so a missing input
    /// never truncates an existing output. If the copy fails after the output
    /// was created, the partial output is removed. I/O errors name the file
    /// they happened on.
    pub fn copy_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<Summary, BmpCopyError> {
        let (input, output) = (input.as_ref(), output.as_ref());

        let infile = File::open(input).map_err(|e| BmpCopyError::file(input, e))?;
        if is_same_file(input, output) {
            return Err(BmpCopyError::SameFile(output.to_path_buf()));
        }
        let outfile = File::create(output).map_err(|e| BmpCopyError::file(output, e))?;
        debug!("copying {} to {}", input.display(), output.display());

        let ends = Endpoints {
            input: Some(input),
            output: Some(output),
        };
        let mut reader = BufReader::new(infile);
        let mut writer = BufWriter::new(outfile);
        let result = self.copy_dyn(&mut reader, &mut writer, &stop, &ends);
        drop(writer);
        drop(reader);

        if result.is_err() {
            if let Err(e) = fs::remove_file(output) {
                warn!("could not remove partial output {}: {e}", output.display());
            }
        }
        result
    }

    /// Copy between arbitrary streams. The writer is flushed on success.
    ///
    /// On error the writer may already hold the header.
    pub fn copy_stream<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        stop: impl Stop,
    ) -> Result<Summary, BmpCopyError> {
        self.copy_dyn(input, output, &stop, &Endpoints::STREAMS)
    }

    /// Copy an in-memory file. Trailing bytes after the payload are dropped.
    pub fn copy_bytes(
        &self,
        data: &[u8],
        stop: impl Stop,
    ) -> Result<(Vec<u8>, Summary), BmpCopyError> {
        let mut input = data;
        let mut out = Vec::new();
        let summary = self.copy_dyn(&mut input, &mut out, &stop, &Endpoints::STREAMS)?;
        Ok((out, summary))
    }

    fn copy_dyn(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        stop: &dyn Stop,
        ends: &Endpoints<'_>,
    ) -> Result<Summary, BmpCopyError> {
        let mut header = [0u8; HEADER_LEN];
        read_section(input, &mut header, Section::Header, self.permissiveness, ends)?;
        let header = BmpHeader::new(header);
        debug!(
            "header: width {} height {} bit depth {}",
            header.width(),
            header.height(),
            header.bit_depth()
        );
        stop.check()?;

        let palette = if header.has_palette() {
            let mut palette = [0u8; PALETTE_LEN];
            read_section(input, &mut palette, Section::Palette, self.permissiveness, ends)?;
            Some(palette)
        } else {
            None
        };
        stop.check()?;

        output
            .write_all(header.as_bytes())
            .map_err(|e| ends.write_error(e))?;

        let layout = header.layout()?;
        if let Some(limits) = self.limits {
            limits.check(&layout)?;
        }
        debug!(
            "layout: {} palette bytes, {} pixel bytes, {} total",
            layout.palette_len, layout.payload_len, layout.total_len
        );

        let pixels = read_payload(input, layout.payload_len, ends)?;
        let missing = layout.payload_len - pixels.len();
        if missing != 0 {
            match self.permissiveness {
                Permissiveness::Strict => {
                    return Err(BmpCopyError::TruncatedInput {
                        section: Section::Payload,
                        needed: layout.payload_len,
                        available: pixels.len(),
                    });
                }
                Permissiveness::Permissive => warn!(
                    "{} truncated at {} of {} bytes, zero-filling",
                    Section::Payload,
                    pixels.len(),
                    layout.payload_len
                ),
            }
        }
        stop.check()?;

        if let Some(palette) = &palette {
            trace!("writing color table");
            output.write_all(palette).map_err(|e| ends.write_error(e))?;
        }
        trace!("writing {} bytes of pixel data", pixels.len());
        output.write_all(&pixels).map_err(|e| ends.write_error(e))?;
        if missing != 0 {
            io::copy(&mut io::repeat(0).take(missing as u64), output)
                .map_err(|e| ends.write_error(e))?;
        }
        output.flush().map_err(|e| ends.write_error(e))?;

        Ok(Summary::new(&header, &layout))
    }
}

/// Paths behind the reader and writer, when they are files.
struct Endpoints<'p> {
    input: Option<&'p Path>,
    output: Option<&'p Path>,
}

impl Endpoints<'static> {
    const STREAMS: Self = Endpoints {
        input: None,
        output: None,
    };
}

impl Endpoints<'_> {
    fn read_error(&self, e: io::Error) -> BmpCopyError {
        match self.input {
            Some(path) => BmpCopyError::file(path, e),
            None => e.into(),
        }
    }

    fn write_error(&self, e: io::Error) -> BmpCopyError {
        match self.output {
            Some(path) => BmpCopyError::file(path, e),
            None => e.into(),
        }
    }
}

/// Read and decode the header from the current position of `input`.
///
/// Consumes exactly [`HEADER_LEN`] bytes on success.
pub fn read_header<R: Read>(input: &mut R) -> Result<BmpHeader, BmpCopyError> {
    let mut header = [0u8; HEADER_LEN];
    read_section(
        input,
        &mut header,
        Section::Header,
        Permissiveness::Strict,
        &Endpoints::STREAMS,
    )?;
    Ok(BmpHeader::new(header))
}

/// Read up to `len` payload bytes.
///
/// The buffer grows with the bytes actually read, so a header declaring a
/// huge payload over a short input costs only what the input holds.
fn read_payload(
    input: &mut dyn Read,
    len: usize,
    ends: &Endpoints<'_>,
) -> Result<Vec<u8>, BmpCopyError> {
    let mut pixels = Vec::new();
    Read::take(&mut *input, len as u64)
        .read_to_end(&mut pixels)
        .map_err(|e| ends.read_error(e))?;
    Ok(pixels)
}

/// Fill `buf` from `input`, retrying interrupted reads.
fn read_section(
    input: &mut dyn Read,
    buf: &mut [u8],
    section: Section,
    permissiveness: Permissiveness,
    ends: &Endpoints<'_>,
) -> Result<(), BmpCopyError> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(ends.read_error(e)),
        }
    }
    if filled == buf.len() {
        return Ok(());
    }

    match permissiveness {
        Permissiveness::Strict => Err(BmpCopyError::TruncatedInput {
            section,
            needed: buf.len(),
            available: filled,
        }),
        Permissiveness::Permissive => {
            warn!(
                "{section} truncated at {filled} of {} bytes, zero-filling",
                buf.len()
            );
            buf[filled..].fill(0);
            Ok(())
        }
    }
}

fn is_same_file(input: &Path, output: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
