use crate::error::{AppError, AppResult};
use std::fs;
use std::io::Read;
use std::path::Path;

/// 支持的压缩格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// 根据文件头识别
    pub fn from_magic(header: &[u8]) -> Option<Self> {
        if header.starts_with(b"PK\x03\x04") || header.starts_with(b"PK\x05\x06") {
            Some(Self::Zip)
        } else if header.starts_with(&[0x1f, 0x8b]) {
            Some(Self::TarGz)
        } else {
            None
        }
    }

    /// 根据文件名或 URL 后缀识别
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name
            .split(['?', '#'])
            .next()
            .unwrap_or(name)
            .to_lowercase();
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else {
            None
        }
    }

    /// 先看文件内容，识别不了再用名称提示
    pub fn detect(archive: &Path, name_hint: Option<&str>) -> AppResult<Self> {
        let mut header = [0u8; 4];
        let read = fs::File::open(archive)
            .and_then(|mut f| f.read(&mut header))
            .map_err(|e| AppError::extraction(archive, format!("读取文件头失败: {}", e)))?;

        Self::from_magic(&header[..read])
            .or_else(|| name_hint.and_then(Self::from_name))
            .or_else(|| archive.to_str().and_then(Self::from_name))
            .ok_or_else(|| AppError::extraction(archive, "无法识别的压缩格式"))
    }
}

/// 解压到目标目录，返回识别出的格式
pub fn extract(archive: &Path, dest_dir: &Path, name_hint: Option<&str>) -> AppResult<ArchiveFormat> {
    let format = ArchiveFormat::detect(archive, name_hint)?;
    tracing::info!("解压 {} ({:?}) 到 {}", archive.display(), format, dest_dir.display());
    match format {
        ArchiveFormat::Zip => extract_zip(archive, dest_dir)?,
        ArchiveFormat::TarGz => extract_tar_gz(archive, dest_dir)?,
    }
    Ok(format)
}

fn extract_zip(zip_path: &Path, dest_dir: &Path) -> AppResult<()> {
    let file = fs::File::open(zip_path)
        .map_err(|e| AppError::extraction(zip_path, format!("打开 ZIP 文件失败: {}", e)))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::extraction(zip_path, format!("读取 ZIP 文件失败: {}", e)))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| AppError::extraction(zip_path, format!("读取 ZIP 文件项失败: {}", e)))?;
        let relative = entry.enclosed_name().map(Path::to_path_buf).ok_or_else(|| {
            AppError::extraction(zip_path, format!("非法的文件路径: {}", entry.name()))
        })?;
        let outpath = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath)
                .map_err(|e| AppError::filesystem(&outpath, format!("创建目录失败: {}", e)))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::filesystem(parent, format!("创建父目录失败: {}", e)))?;
        }
        let mut outfile = fs::File::create(&outpath)
            .map_err(|e| AppError::filesystem(&outpath, format!("创建文件失败: {}", e)))?;
        std::io::copy(&mut entry, &mut outfile)
            .map_err(|e| AppError::extraction(zip_path, format!("写入 {} 失败: {}", outpath.display(), e)))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))
                .map_err(|e| AppError::filesystem(&outpath, format!("设置权限失败: {}", e)))?;
        }
    }
    Ok(())
}

fn extract_tar_gz(tar_path: &Path, dest_dir: &Path) -> AppResult<()> {
    let file = fs::File::open(tar_path)
        .map_err(|e| AppError::extraction(tar_path, format!("打开 TAR.GZ 文件失败: {}", e)))?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);
    archive
        .unpack(dest_dir)
        .map_err(|e| AppError::extraction(tar_path, e))
}
