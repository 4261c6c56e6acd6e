use ansi_term::Colour::{Blue, Red, White};

/// Format a bare one-line note with no source span, used for errors that have no useful
/// column/span information of their own (e.g. preprocessor failures).
pub(crate) fn make_info_note(header: &str, src_file: &str) -> String {
	format!("{} {}\n  {} {}\n", Red.bold().paint("error:"), White.bold().paint(header), Blue
		.bold()
		.paint("-->"), src_file)
}
