use crate::registry::DecoderRegistry;

/// A plugin descriptor that registers decode strategies into a [`DecoderRegistry`].
///
/// Crates submit plugins with `linkage_decode::inventory::submit!` and they are installed by
/// [`DecoderRegistry::from_config`]. Link order is not deterministic, so installation is ordered
/// by priority (higher first) and then by name.
#[derive(Debug)]
pub struct DecoderPlugin {
	/// Unique plugin name, matched against `plugins.disabled`.
	pub name: &'static str,
	/// Installation precedence; higher installs earlier and so is probed earlier.
	pub priority: i16,
	/// Function called during registry construction to register the plugin's strategies.
	pub register: fn(&DecoderRegistry),
}

inventory::collect!(DecoderPlugin);

impl DecoderPlugin {
	/// Creates a new plugin definition.
	pub const fn new(name: &'static str, priority: i16, register: fn(&DecoderRegistry)) -> Self {
		Self {
			name,
			priority,
			register,
		}
	}
}

/// Returns every submitted plugin not named in `disabled`, in installation order.
pub fn installation_order(disabled: &[String]) -> Vec<&'static DecoderPlugin> {
	let mut plugins: Vec<&'static DecoderPlugin> = inventory::iter::<DecoderPlugin>
		.into_iter()
		.filter(|plugin| !disabled.iter().any(|name| name == plugin.name))
		.collect();
	plugins.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.name.cmp(b.name)));
	plugins
}

/// Runs every enabled plugin against `registry` and returns how many ran.
pub fn install_plugins(registry: &DecoderRegistry, disabled: &[String]) -> usize {
	for name in disabled {
		if !inventory::iter::<DecoderPlugin>
			.into_iter()
			.any(|plugin| plugin.name == name)
		{
			tracing::warn!(plugin = %name, "disabled plugin is not linked");
		}
	}

	let plugins = installation_order(disabled);
	for plugin in &plugins {
		tracing::info!(
			plugin = plugin.name,
			priority = plugin.priority,
			"installing decoder plugin"
		);
		(plugin.register)(registry);
	}
	plugins.len()
}
