use std::fs;
use std::path::Path;

use clap::Parser;
use cli::cli::{Cli, Status, execute, files::collect_route_files};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "app/[id]/page.tsx",
        "export default function Page({ params }: { params: { id: number } }) {}\n",
    );
    write(
        dir.path(),
        "app/[id]/layout.tsx",
        "export default function Layout({ children }: { children: React.ReactNode }) {}\n",
    );
    write(dir.path(), "app/[id]/button.tsx", "export const Button = () => null;\n");
    write(
        dir.path(),
        "node_modules/pkg/app/[x]/page.tsx",
        "export default function Page({ params }: { params: { y: string } }) {}\n",
    );
    dir
}

fn args(dir: &Path, extra: &[&str]) -> Cli {
    let root = dir.to_string_lossy().to_string();
    let mut argv = vec!["route-params", root.as_str(), "--project", root.as_str()];
    argv.extend_from_slice(extra);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn discovers_route_files_only() {
    let dir = project();
    let files = collect_route_files(&[dir.path().to_path_buf()]).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|path| path.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["app/[id]/layout.tsx", "app/[id]/page.tsx"]);
}

#[test]
fn reports_problems() {
    let dir = project();
    let status = execute(&args(dir.path(), &[])).unwrap();
    assert_eq!(status, Status::Problems);
}

#[test]
fn fix_then_clean() {
    let dir = project();
    let status = execute(&args(dir.path(), &["--fix", "--format", "json"])).unwrap();
    assert_eq!(status, Status::Clean);
    assert_eq!(
        fs::read_to_string(dir.path().join("app/[id]/page.tsx")).unwrap(),
        "export default function Page({ params }: { params: { id: string } }) {}\n"
    );
    assert_eq!(execute(&args(dir.path(), &[])).unwrap(), Status::Clean);
}

#[test]
fn parse_errors_count_as_problems() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "app/page.tsx", "export default function Page({ params }: {\n");
    let status = execute(&args(dir.path(), &[])).unwrap();
    assert_eq!(status, Status::Problems);
}

#[test]
fn missing_path_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(execute(&args(&missing, &[])).is_err());
}
