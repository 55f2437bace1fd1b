// Subcommand bodies, kept free of terminal setup so they can run against any source.

use std::io::Write;

use anyhow::{Context, Result};
use rhythmkey_input::{CaptureSource, capture};
use rhythmkey_model::RhythmKey;
use tracing::info;

/// Capture a key and print its token, or its digest when `hash` is set.
pub fn read<S: CaptureSource, W: Write>(
    source: S,
    hash: bool,
    salt: i64,
    out: &mut W,
) -> Result<()> {
    let rk = capture(source).context("failed to capture rhythm key")?;
    info!(keys = rk.len(), "rhythm key captured");

    if hash {
        let digest = rk.digest(salt).context("failed to hash rhythm key")?;
        writeln!(out, "{digest}")?;
    } else {
        out.write_all(&rk.encode())?;
        writeln!(out)?;
    }
    Ok(())
}

/// Capture a key and compare it against `stored` by digest. Returns whether they match.
pub fn compare<S: CaptureSource, W: Write>(
    stored: &RhythmKey,
    source: S,
    salt: i64,
    out: &mut W,
) -> Result<bool> {
    let typed = capture(source).context("failed to capture rhythm key")?;
    let matched = stored
        .matches(&typed, salt)
        .context("failed to hash rhythm keys")?;
    info!(matched, salt, "compared rhythm keys");

    writeln!(out, "compare: {stored} | {typed}")?;
    writeln!(out, "{}", if matched { "match" } else { "mismatch" })?;
    Ok(matched)
}

/// Decompose a token into its events.
pub fn parse<W: Write>(token: &str, json: bool, out: &mut W) -> Result<()> {
    let rk = RhythmKey::parse(token).context("failed to parse rhythm key")?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &rk)?;
        writeln!(out)?;
    } else {
        writeln!(out, "rhythmkey: {rk}")?;
    }
    Ok(())
}
