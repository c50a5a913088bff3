/// Template written by `layercfg --init`.
pub fn generate_init_template() -> String {
	r#"# layercfg manifest
#
# The base layer is shared by every mode. Each mode names an overlay that is
# merged on top of it. Paths are relative to this file; layers may be TOML or
# JSON and may declare `extends = "<path>"` to build on another layer.

base = "config/common.toml"
default-mode = "development"

# Environment variable consulted when --mode is not given
# mode-env-var = "ENV"

[modes.development]
overlay = "config/dev.toml"

[modes.production]
overlay = "config/prod.toml"

# Sequences (plugins, module.rules, ...) are appended base-then-overlay by
# default. Rules below pick another strategy by key path; first match wins.
# Strategies: append, prepend, replace
#
# [[policy]]
# path = "^plugins$"
# strategy = "append"
#
# [[modes.production.policy]]
# path = '^module\.rules$'
# strategy = "replace"
"#
	.to_string()
}
