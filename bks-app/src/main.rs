mod args;

use std::{fs, path::Path, process::ExitCode};

use args::{Args, Command};
use bks_codec::{
    bitmap::{ImageDecoder, ImageEncoder},
    bks::{self, BksDecoder, BksEncoder},
    raster::{self, RasterEncoder},
};
use clap::Parser;
use log::{error, info};

fn compress(input_path: &Path, output_path: &Path) -> bks_codec::Result<()> {
    let bitmap = raster::load_image_from_path(input_path)?;
    let bytes = BksEncoder::new(&bitmap).encode()?;
    fs::write(output_path, &bytes)?;
    info!(
        "compressed {}x{} image: {} -> {} bytes",
        bitmap.width(),
        bitmap.height(),
        bitmap.data.len(),
        bytes.len()
    );
    Ok(())
}

fn decompress(input_path: &Path, output_path: &Path) -> bks_codec::Result<()> {
    let bytes = fs::read(input_path)?;
    let bitmap = BksDecoder::new(&bytes).decode()?;
    RasterEncoder::new(&bitmap).encode_to_file(output_path)?;
    info!(
        "decompressed {}x{} image to {}",
        bitmap.width(),
        bitmap.height(),
        output_path.display()
    );
    Ok(())
}

fn show_info(input_path: &Path) -> bks_codec::Result<()> {
    let bytes = fs::read(input_path)?;
    let header = bks::read_header(&bytes)?;
    let pixel_bytes = header.expected_pixel_bytes();

    println!("{}", input_path.display());
    println!("  size:    {}x{}", header.width, header.height);
    println!("  payload: {} bytes", header.payload_len);
    println!("  decoded: {} bytes", pixel_bytes);
    if let Some(ratio) = header.compression_ratio() {
        println!("  ratio:   {:.2}", ratio);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let result = match &args.command {
        Command::Compress {
            input_path,
            output_path,
        } => compress(input_path, output_path),
        Command::Decompress {
            input_path,
            output_path,
        } => decompress(input_path, output_path),
        Command::Info { input_path } => show_info(input_path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[test]
fn compress_then_decompress() {
    use bks_codec::bitmap::Bitmap;

    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("in.png");
    let container = dir.path().join("image.bks");
    let restored = dir.path().join("out.png");

    let data = (0..6 * 5).flat_map(|i| [(i / 6 * 40) as u8, 7, 7]).collect();
    let bitmap = Bitmap::rgb(6, 5, data).unwrap();
    raster::save_image(&bitmap, &original).unwrap();

    compress(&original, &container).unwrap();
    decompress(&container, &restored).unwrap();
    assert_eq!(raster::load_image_from_path(&restored).unwrap(), bitmap);
    assert!(show_info(&container).is_ok());
}

#[test]
fn decompress_rejects_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bks");
    fs::write(&path, [2, 0, 0, 0, 1, 0]).unwrap();
    assert!(matches!(
        decompress(&path, &dir.path().join("unused.png")),
        Err(bks_codec::Error::MalformedHeader { len: 6 })
    ));
}

#[test]
fn failed_compress_writes_nothing() {
    use bks_codec::bitmap::Bitmap;

    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("pixel.png");
    raster::save_image(&Bitmap::rgb(1, 1, vec![1, 2, 3]).unwrap(), &original).unwrap();

    let output = dir.path().join("missing").join("pixel.bks");
    assert!(matches!(
        compress(&original, &output),
        Err(bks_codec::Error::Io(_))
    ));
    assert!(!output.exists());
}
