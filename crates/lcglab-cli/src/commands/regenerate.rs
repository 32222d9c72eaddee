use super::GeneratorArgs;

pub fn run(args: &GeneratorArgs) {
    let (resolved, config) = super::resolve_or_exit(args);
    let evaluation = lcglab_core::regenerate(&resolved.params, &config);
    if !args.json {
        println!(
            "Seed X0 = {} -> {} (+{} mod {})\n",
            resolved.params.seed(),
            evaluation.generation.params.seed(),
            lcglab_core::SEED_NUDGE,
            resolved.params.modulus()
        );
    }
    super::emit(&evaluation, args);
}
