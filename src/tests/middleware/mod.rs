mod compression;
mod cors;
mod exec;
mod file_upload;
mod shield;
