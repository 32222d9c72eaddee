use super::GeneratorArgs;

pub fn run(args: &GeneratorArgs) {
    let (resolved, config) = super::resolve_or_exit(args);
    let evaluation = lcglab_core::evaluate(&resolved.params, &config);
    super::emit(&evaluation, args);
}
