use file2png::{
    cli::TransferArgs,
    container::ContainerFormat,
    error::{Error, ErrorKind},
    handler::{handle_decode, handle_encode},
};
use image::{ImageBuffer, Rgba};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 构造一组文件到文件的参数
fn transfer(input: &Path, output: &Path, force: bool) -> TransferArgs {
    TransferArgs {
        input: Some(input.to_path_buf()),
        output: Some(output.to_path_buf()),
        format: None,
        force,
        quiet: true,
    }
}

fn error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    err.downcast_ref::<Error>().map(Error::kind)
}

/// 验证从编码到解码的完整流程
#[test]
fn test_handle_encode_and_decode_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let source_path = dir.path().join("source.bin");
    let image_path = dir.path().join("encoded.png");
    let recovered_path = dir.path().join("recovered.bin");

    let mut original = vec![0u8; 12_345];
    rand::rng().fill_bytes(&mut original);
    fs::write(&source_path, &original)?;

    // 2. 测试 handle_encode
    handle_encode(transfer(&source_path, &image_path, false))?;
    assert!(image_path.exists(), "Encoded image should be created.");
    let png = fs::read(&image_path)?;
    assert_eq!(&png[1..4], b"PNG");

    // 3. 测试 handle_decode
    handle_decode(transfer(&image_path, &recovered_path, false))?;

    // 4. 验证结果
    let recovered = fs::read(&recovered_path)?;
    assert_eq!(original, recovered, "Recovered file must match the original.");

    Ok(())
}

/// 验证空文件同样可以往返
#[test]
fn test_empty_file_round_trip() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let source_path = dir.path().join("empty");
    let image_path = dir.path().join("empty.png");
    let recovered_path = dir.path().join("empty.out");
    fs::write(&source_path, b"")?;

    handle_encode(transfer(&source_path, &image_path, false))?;
    handle_decode(transfer(&image_path, &recovered_path, false))?;

    assert!(fs::read(&recovered_path)?.is_empty());
    Ok(())
}

/// 验证格式可以从扩展名推断，也可以显式指定
#[test]
fn test_format_selection() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let source_path = dir.path().join("source.txt");
    fs::write(&source_path, "format selection test")?;

    // 扩展名推断为 BMP
    let bmp_path = dir.path().join("encoded.bmp");
    handle_encode(transfer(&source_path, &bmp_path, false))?;
    assert_eq!(&fs::read(&bmp_path)?[..2], b"BM");

    // 未知扩展名默认使用 PNG
    let unknown_path = dir.path().join("encoded.data");
    handle_encode(transfer(&source_path, &unknown_path, false))?;
    assert_eq!(&fs::read(&unknown_path)?[1..4], b"PNG");

    // 显式指定的格式优先于扩展名
    let qoi_path = dir.path().join("encoded.png");
    let mut args = transfer(&source_path, &qoi_path, false);
    args.format = Some(ContainerFormat::Qoi);
    handle_encode(args)?;
    assert_eq!(&fs::read(&qoi_path)?[..4], b"qoif");

    let recovered_path = dir.path().join("recovered.txt");
    let mut args = transfer(&qoi_path, &recovered_path, false);
    args.format = Some(ContainerFormat::Qoi);
    handle_decode(args)?;
    assert_eq!(fs::read_to_string(&recovered_path)?, "format selection test");

    Ok(())
}

/// 验证有损格式会被拒绝
#[test]
fn test_lossy_extension_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let source_path = dir.path().join("source.txt");
    let jpeg_path = dir.path().join("encoded.jpg");
    fs::write(&source_path, "lossy")?;

    let result = handle_encode(transfer(&source_path, &jpeg_path, false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Refusing to write an unsupported or lossy image"));
        assert_eq!(error_kind(&e), Some(ErrorKind::Encode));
    }
    assert!(!jpeg_path.exists(), "No output should be written.");

    Ok(())
}

/// 验证无损但不受支持的格式同样被拒绝
#[test]
fn test_unsupported_extension_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let source_path = dir.path().join("source.txt");
    let tga_path = dir.path().join("encoded.tga");
    fs::write(&source_path, "unsupported")?;

    let result = handle_encode(transfer(&source_path, &tga_path, false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(error_kind(&e), Some(ErrorKind::Encode));
        let root = e.downcast_ref::<Error>().map(ToString::to_string).unwrap_or_default();
        assert!(root.contains("unsupported or lossy"), "Unexpected message: {root}");
    }
    assert!(!tga_path.exists());

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let source_path = dir.path().join("source.txt");
    let dest_path = dir.path().join("dest.png");
    fs::write(&source_path, "some text")?;

    // 2. 场景一：测试覆盖保护
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;

    let result = handle_encode(transfer(&source_path, &dest_path, false));
    assert!(result.is_err(), "Execution should fail without --force when file exists.");
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    let result = handle_encode(transfer(&source_path, &dest_path, true));
    assert!(result.is_ok(), "Execution should succeed with --force when file exists.");

    let content = fs::read(&dest_path)?;
    assert_ne!(content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证无法解析的图像报告解码错误，并且不会写出任何内容
#[test]
fn test_handle_decode_invalid_image() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("broken.png");
    let output_path = dir.path().join("output.bin");
    fs::write(&image_path, "not a png at all")?;

    let result = handle_decode(transfer(&image_path, &output_path, false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Unable to parse image"));
        assert_eq!(error_kind(&e), Some(ErrorKind::Decode));
    }
    assert!(!output_path.exists());

    Ok(())
}

/// 验证头部声明的长度超出图像容量时报告截断
#[test]
fn test_handle_decode_truncated_image() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("truncated.png");
    let output_path = dir.path().join("output.bin");

    // 2x2 图像，头部声明 100 字节
    let image = ImageBuffer::from_fn(2, 2, |x, y| match (x, y) {
        (0, 0) => Rgba([100u8, 0, 0, 255]),
        _ => Rgba([0, 0, 0, 255]),
    });
    image.save(&image_path)?;

    let result = handle_decode(transfer(&image_path, &output_path, false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(error_kind(&e), Some(ErrorKind::TruncatedData));
    }
    assert!(!output_path.exists());

    Ok(())
}

/// 验证缺失的输入文件报告读取错误
#[test]
fn test_handle_encode_missing_input() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let missing: PathBuf = dir.path().join("missing.bin");
    let output_path = dir.path().join("output.png");

    let result = handle_encode(transfer(&missing, &output_path, false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Unable to read input"));
        assert_eq!(error_kind(&e), Some(ErrorKind::Read));
    }
    assert!(!output_path.exists());

    Ok(())
}

/// 验证输出目录不存在时报告写入错误，并且不会留下任何文件
#[test]
fn test_handle_write_error() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let source_path = dir.path().join("source.txt");
    let output_path = dir.path().join("missing").join("out.png");
    fs::write(&source_path, "nowhere to go")?;

    let result = handle_encode(transfer(&source_path, &output_path, false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Unable to write output"));
        assert_eq!(error_kind(&e), Some(ErrorKind::Write));
    }
    assert!(!output_path.exists());
    assert!(!dir.path().join("missing").exists());

    // 解码方向同样如此
    let image_path = dir.path().join("encoded.png");
    handle_encode(transfer(&source_path, &image_path, false))?;
    let recovered_path = dir.path().join("missing").join("recovered.txt");

    let result = handle_decode(transfer(&image_path, &recovered_path, false));

    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(error_kind(&e), Some(ErrorKind::Write));
    }
    assert!(!recovered_path.exists());

    Ok(())
}
