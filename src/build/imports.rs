//! Relative import rewriting for compiled scripts.
//!
//! `tsc` leaves module specifiers as written, but browsers resolve ES module
//! imports literally. `import { a } from './util'` must become
//! `'./util.js'` before the output can be loaded.

use crate::error::Result;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

/// `import`/`export` declarations ending in a `./` or `../` string specifier,
/// either `... from '<spec>'` or a bare `import '<spec>'`.
static RELATIVE_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^(?P<head>[ \t]*(?:(?:import|export)\b[^'"`;]*?\bfrom[ \t]*|import[ \t]*))(?P<quote>['"])(?P<spec>\.\.?/[^'"\r\n]*)['"]"#,
    )
    .unwrap_or_else(|e| panic!("invalid import pattern: {e}"))
});

/// Append `.js` to every extensionless relative specifier in `source`
pub fn add_js_extensions(source: &str) -> Cow<'_, str> {
    RELATIVE_SPECIFIER.replace_all(source, |caps: &Captures<'_>| {
        let spec = &caps["spec"];
        let quote = &caps["quote"];
        if Path::new(spec).extension().is_some() {
            caps[0].to_string()
        } else {
            format!("{}{quote}{spec}.js{quote}", &caps["head"])
        }
    })
}

/// Rewrite every `.js` file under `dir` in place. Returns how many changed.
pub async fn rewrite_relative_imports(dir: &Path) -> Result<usize> {
    let mut rewritten = 0;
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "js") {
            continue;
        }

        let source = tokio::fs::read_to_string(path).await?;
        if let Cow::Owned(updated) = add_js_extensions(&source)
            && updated != source
        {
            tokio::fs::write(path, updated).await?;
            log::debug!("Rewrote relative imports in {}", path.display());
            rewritten += 1;
        }
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensionless_relative_specifiers_get_js() {
        let source = "import { roll } from './dice';\n\
                      export * from \"../shared/constants\";\n\
                      import './hooks';\n";
        assert_eq!(
            add_js_extensions(source),
            "import { roll } from './dice.js';\n\
             export * from \"../shared/constants.js\";\n\
             import './hooks.js';\n"
        );
    }

    #[test]
    fn multiline_import_clause_is_rewritten() {
        let source = "import {\n\tHeroActor,\n\tHeroItem,\n} from './documents/index';\n";
        assert_eq!(
            add_js_extensions(source),
            "import {\n\tHeroActor,\n\tHeroItem,\n} from './documents/index.js';\n"
        );
    }

    #[test]
    fn other_specifiers_are_left_alone() {
        let source = "import { a } from './already.js';\n\
                      import data from './data.json';\n\
                      import { b } from 'package';\n\
                      import { c } from '/systems/hero6e/c';\n\
                      const lazy = import('./lazy');\n\
                      export const path = './not-a-module';\n";
        assert_eq!(add_js_extensions(source), source);
    }

    #[tokio::test]
    async fn rewrites_only_js_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("module")).unwrap();
        std::fs::write(dir.path().join("hero6e.js"), "import './module/setup';\n").unwrap();
        std::fs::write(dir.path().join("module/setup.js"), "export {};\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "import './x';\n").unwrap();

        assert_eq!(rewrite_relative_imports(dir.path()).await.unwrap(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("hero6e.js")).unwrap(),
            "import './module/setup.js';\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "import './x';\n"
        );
    }
}
